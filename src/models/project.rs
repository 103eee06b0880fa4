use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type ProjectId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(ProjectStatus::Planning),
            "in-progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            other => Err(format!("Unknown project status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub supplier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One dated journal entry in a project's progress log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub time_spent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<Video>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub estimated_hours: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<u32>,
    /// Marketplace listing for the finished piece.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etsy_link: Option<String>,
    #[serde(default)]
    pub etsy_enabled: bool,
    #[serde(default)]
    pub is_sold: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub techniques: Vec<String>,
    #[serde(default)]
    pub updates: Vec<ProgressUpdate>,
}

impl Project {
    /// The record a new project starts from before anything is filled in.
    pub fn blank(id: ProjectId) -> Self {
        ProjectInput::default().into_project(id)
    }

    /// Hours counted towards dashboard totals: actual when logged, else the estimate.
    pub fn counted_hours(&self) -> u32 {
        self.actual_hours.unwrap_or(self.estimated_hours)
    }

    pub fn material_cost(&self) -> f64 {
        self.materials.iter().map(|m| m.cost).sum()
    }
}

/// Client-side draft of a project, everything except the identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub category: String,
    pub difficulty: Difficulty,
    pub start_date: String,
    pub completion_date: Option<String>,
    pub estimated_hours: u32,
    pub actual_hours: Option<u32>,
    pub etsy_link: Option<String>,
    pub etsy_enabled: bool,
    pub is_sold: bool,
    pub is_featured: bool,
    pub images: Vec<String>,
    pub videos: Vec<Video>,
    pub materials: Vec<Material>,
    pub equipment: Vec<Equipment>,
    pub techniques: Vec<String>,
    pub updates: Vec<ProgressUpdate>,
}

impl ProjectInput {
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            category: self.category,
            difficulty: self.difficulty,
            start_date: self.start_date,
            completion_date: self.completion_date,
            estimated_hours: self.estimated_hours,
            actual_hours: self.actual_hours,
            etsy_link: self.etsy_link,
            etsy_enabled: self.etsy_enabled,
            is_sold: self.is_sold,
            is_featured: self.is_featured,
            images: self.images,
            videos: self.videos,
            materials: self.materials,
            equipment: self.equipment,
            techniques: self.techniques,
            updates: self.updates,
        }
    }
}

/// Card-sized view of a project for the public showcase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListItem {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub category: String,
    pub difficulty: Difficulty,
    pub start_date: String,
    pub completion_date: Option<String>,
    pub cover_image: Option<String>,
    pub etsy_link: Option<String>,
    pub is_featured: bool,
    pub update_count: usize,
}

impl From<&Project> for ProjectListItem {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            status: project.status,
            category: project.category.clone(),
            difficulty: project.difficulty,
            start_date: project.start_date.clone(),
            completion_date: project.completion_date.clone(),
            cover_image: project.images.first().cloned(),
            etsy_link: project
                .etsy_link
                .clone()
                .filter(|_| project.etsy_enabled),
            is_featured: project.is_featured,
            update_count: project.updates.len(),
        }
    }
}
