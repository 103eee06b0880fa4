//! Working copy of one project while it is being created or edited.
//!
//! Every nested collection is keyed by an [`EntryId`] handed out when the
//! element is appended. Handles stay valid while other elements are added
//! or removed, so an edit aimed at one material can never land on its
//! neighbour. [`Entries::handle_at`] turns a list position into a handle for
//! callers that only know indices.

use base64::Engine;
use chrono::Utc;
use tracing::debug;
use crate::errors::EditorError;
use crate::models::{
    Difficulty, Equipment, Material, ProgressUpdate, Project, ProjectId, ProjectInput,
    ProjectStatus, Video,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u32);

/// Ordered elements with stable handles.
#[derive(Debug, Clone)]
pub struct Entries<T> {
    items: Vec<(EntryId, T)>,
}

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Entries<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&T> {
        self.items.iter().find(|(key, _)| *key == id).map(|(_, v)| v)
    }

    pub fn handle_at(&self, index: usize) -> Option<EntryId> {
        self.items.get(index).map(|(key, _)| *key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &T)> {
        self.items.iter().map(|(key, v)| (*key, v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|(_, v)| v)
    }

    fn push(&mut self, id: EntryId, value: T) {
        self.items.push((id, value));
    }

    fn get_mut(&mut self, id: EntryId) -> Option<&mut T> {
        self.items.iter_mut().find(|(key, _)| *key == id).map(|(_, v)| v)
    }

    fn remove(&mut self, id: EntryId) -> Option<T> {
        let index = self.items.iter().position(|(key, _)| *key == id)?;
        Some(self.items.remove(index).1)
    }

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values().cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { original_id: ProjectId },
}

/// What the editor hands back on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub project: Project,
    pub mode: EditorMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectField {
    Title(String),
    Description(String),
    Status(ProjectStatus),
    Category(String),
    Difficulty(Difficulty),
    StartDate(String),
    CompletionDate(Option<String>),
    EstimatedHours(u32),
    ActualHours(Option<u32>),
    EtsyLink(Option<String>),
    EtsyEnabled(bool),
    IsSold(bool),
    IsFeatured(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialField {
    Name(String),
    Quantity(String),
    Cost(f64),
    Supplier(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EquipmentField {
    Name(String),
    Description(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum VideoField {
    Title(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateField {
    Date(String),
    Title(String),
    Content(String),
    TimeSpent(f64),
    Photos(Vec<String>),
    Videos(Vec<Video>),
}

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Where ingested images go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTarget {
    Project,
    Update(EntryId),
}

#[derive(Debug, Clone)]
pub struct ProjectEditor {
    mode: EditorMode,
    categories: Vec<String>,
    next_entry: u32,
    /// Scalar fields; its collections stay empty while editing.
    draft: Project,
    images: Entries<String>,
    videos: Entries<Video>,
    materials: Entries<Material>,
    equipment: Entries<Equipment>,
    techniques: Entries<String>,
    updates: Entries<ProgressUpdate>,
}

impl ProjectEditor {
    /// Start from the blank project with the given fresh id.
    pub fn create(id: ProjectId, categories: Vec<String>) -> Self {
        Self::from_project(Project::blank(id), EditorMode::Create, categories)
    }

    /// Start from an existing record.
    pub fn edit(project: Project, categories: Vec<String>) -> Self {
        let original_id = project.id;
        Self::from_project(project, EditorMode::Edit { original_id }, categories)
    }

    fn from_project(mut project: Project, mode: EditorMode, categories: Vec<String>) -> Self {
        let mut editor = Self {
            mode,
            categories,
            next_entry: 0,
            draft: Project::blank(project.id),
            images: Entries::default(),
            videos: Entries::default(),
            materials: Entries::default(),
            equipment: Entries::default(),
            techniques: Entries::default(),
            updates: Entries::default(),
        };
        editor.load_collections(&mut project);
        editor.draft = project;
        editor
    }

    /// Replace the whole draft with a client-side copy. Identity and mode
    /// stay as they were.
    pub fn replace_draft(&mut self, input: ProjectInput) {
        let mut project = input.into_project(self.draft.id);
        self.images = Entries::default();
        self.videos = Entries::default();
        self.materials = Entries::default();
        self.equipment = Entries::default();
        self.techniques = Entries::default();
        self.updates = Entries::default();
        self.load_collections(&mut project);
        self.draft = project;
    }

    fn load_collections(&mut self, project: &mut Project) {
        for image in std::mem::take(&mut project.images) {
            let id = self.allocate();
            self.images.push(id, image);
        }
        for video in std::mem::take(&mut project.videos) {
            let id = self.allocate();
            self.videos.push(id, video);
        }
        for material in std::mem::take(&mut project.materials) {
            let id = self.allocate();
            self.materials.push(id, material);
        }
        for item in std::mem::take(&mut project.equipment) {
            let id = self.allocate();
            self.equipment.push(id, item);
        }
        for technique in std::mem::take(&mut project.techniques) {
            let id = self.allocate();
            self.techniques.push(id, technique);
        }
        for update in std::mem::take(&mut project.updates) {
            let id = self.allocate();
            self.updates.push(id, update);
        }
    }

    fn allocate(&mut self) -> EntryId {
        let id = EntryId(self.next_entry);
        self.next_entry += 1;
        id
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn id(&self) -> ProjectId {
        self.draft.id
    }

    /// Categories offered for selection when the editor was opened.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn images(&self) -> &Entries<String> {
        &self.images
    }

    pub fn videos(&self) -> &Entries<Video> {
        &self.videos
    }

    pub fn materials(&self) -> &Entries<Material> {
        &self.materials
    }

    pub fn equipment(&self) -> &Entries<Equipment> {
        &self.equipment
    }

    pub fn techniques(&self) -> &Entries<String> {
        &self.techniques
    }

    pub fn updates(&self) -> &Entries<ProgressUpdate> {
        &self.updates
    }

    pub fn set(&mut self, field: ProjectField) {
        let draft = &mut self.draft;
        match field {
            ProjectField::Title(v) => draft.title = v,
            ProjectField::Description(v) => draft.description = v,
            ProjectField::Status(v) => draft.status = v,
            ProjectField::Category(v) => draft.category = v,
            ProjectField::Difficulty(v) => draft.difficulty = v,
            ProjectField::StartDate(v) => draft.start_date = v,
            ProjectField::CompletionDate(v) => draft.completion_date = non_empty(v),
            ProjectField::EstimatedHours(v) => draft.estimated_hours = v,
            ProjectField::ActualHours(v) => draft.actual_hours = v,
            ProjectField::EtsyLink(v) => draft.etsy_link = non_empty(v),
            ProjectField::EtsyEnabled(v) => draft.etsy_enabled = v,
            ProjectField::IsSold(v) => draft.is_sold = v,
            ProjectField::IsFeatured(v) => draft.is_featured = v,
        }
    }

    // ------------------------------------------------------------------
    // Materials
    // ------------------------------------------------------------------

    pub fn add_material(&mut self) -> EntryId {
        let id = self.allocate();
        self.materials.push(id, Material::default());
        id
    }

    /// Returns false when the handle no longer exists.
    pub fn update_material(&mut self, id: EntryId, field: MaterialField) -> bool {
        let Some(material) = self.materials.get_mut(id) else {
            return false;
        };
        match field {
            MaterialField::Name(v) => material.name = v,
            MaterialField::Quantity(v) => material.quantity = v,
            MaterialField::Cost(v) => material.cost = v,
            MaterialField::Supplier(v) => material.supplier = v,
        }
        true
    }

    pub fn remove_material(&mut self, id: EntryId) -> Option<Material> {
        self.materials.remove(id)
    }

    // ------------------------------------------------------------------
    // Equipment
    // ------------------------------------------------------------------

    pub fn add_equipment(&mut self) -> EntryId {
        let id = self.allocate();
        self.equipment.push(id, Equipment::default());
        id
    }

    pub fn update_equipment(&mut self, id: EntryId, field: EquipmentField) -> bool {
        let Some(item) = self.equipment.get_mut(id) else {
            return false;
        };
        match field {
            EquipmentField::Name(v) => item.name = v,
            EquipmentField::Description(v) => item.description = v,
        }
        true
    }

    pub fn remove_equipment(&mut self, id: EntryId) -> Option<Equipment> {
        self.equipment.remove(id)
    }

    // ------------------------------------------------------------------
    // Techniques
    // ------------------------------------------------------------------

    /// Append a technique name as typed into a prompt. A dismissed prompt
    /// (`None`) or an empty answer adds nothing.
    pub fn add_technique(&mut self, answer: Option<&str>) -> Option<EntryId> {
        let name = answer.filter(|name| !name.is_empty())?;
        let id = self.allocate();
        self.techniques.push(id, name.to_string());
        Some(id)
    }

    pub fn remove_technique(&mut self, id: EntryId) -> Option<String> {
        self.techniques.remove(id)
    }

    // ------------------------------------------------------------------
    // Progress updates
    // ------------------------------------------------------------------

    /// Append an empty entry dated today.
    pub fn add_update(&mut self) -> EntryId {
        let id = self.allocate();
        self.updates.push(
            id,
            ProgressUpdate {
                date: Utc::now().format("%Y-%m-%d").to_string(),
                title: String::new(),
                content: String::new(),
                time_spent: 0.0,
                photos: Some(Vec::new()),
                videos: Some(Vec::new()),
            },
        );
        id
    }

    pub fn update_update(&mut self, id: EntryId, field: UpdateField) -> bool {
        let Some(update) = self.updates.get_mut(id) else {
            return false;
        };
        match field {
            UpdateField::Date(v) => update.date = v,
            UpdateField::Title(v) => update.title = v,
            UpdateField::Content(v) => update.content = v,
            UpdateField::TimeSpent(v) => update.time_spent = v,
            UpdateField::Photos(v) => update.photos = Some(v),
            UpdateField::Videos(v) => update.videos = Some(v),
        }
        true
    }

    pub fn remove_update(&mut self, id: EntryId) -> Option<ProgressUpdate> {
        self.updates.remove(id)
    }

    // ------------------------------------------------------------------
    // Media
    // ------------------------------------------------------------------

    pub fn add_image(&mut self, url: impl Into<String>) -> EntryId {
        let id = self.allocate();
        self.images.push(id, url.into());
        id
    }

    pub fn remove_image(&mut self, id: EntryId) -> Option<String> {
        self.images.remove(id)
    }

    pub fn add_video(&mut self) -> EntryId {
        let id = self.allocate();
        self.videos.push(id, Video::default());
        id
    }

    pub fn update_video(&mut self, id: EntryId, field: VideoField) -> bool {
        let Some(video) = self.videos.get_mut(id) else {
            return false;
        };
        match field {
            VideoField::Title(v) => video.title = v,
            VideoField::Url(v) => video.url = v,
        }
        true
    }

    pub fn remove_video(&mut self, id: EntryId) -> Option<Video> {
        self.videos.remove(id)
    }

    /// Convert image uploads to data URLs and append them to the project
    /// gallery or to one progress update's photos. Non-image uploads are
    /// skipped, as is everything when the update no longer exists.
    /// Returns how many images were appended.
    pub fn ingest_images(
        &mut self,
        uploads: impl IntoIterator<Item = Upload>,
        target: MediaTarget,
    ) -> usize {
        if let MediaTarget::Update(update_id) = target {
            if self.updates.get(update_id).is_none() {
                debug!(?update_id, "Image target update is gone, ignoring upload");
                return 0;
            }
        }

        let mut appended = 0;
        for upload in uploads {
            if !upload.is_image() {
                debug!(file = %upload.file_name, "Skipping non-image upload");
                continue;
            }
            let url = upload.to_data_url();
            match target {
                MediaTarget::Project => {
                    self.add_image(url);
                }
                MediaTarget::Update(update_id) => {
                    if let Some(update) = self.updates.get_mut(update_id) {
                        update.photos.get_or_insert_with(Vec::new).push(url);
                    }
                }
            }
            appended += 1;
        }
        appended
    }

    // ------------------------------------------------------------------
    // Commit
    // ------------------------------------------------------------------

    /// The project as it would be saved right now.
    pub fn preview(&self) -> Project {
        let mut project = self.draft.clone();
        project.images = self.images.to_vec();
        project.videos = self.videos.to_vec();
        project.materials = self.materials.to_vec();
        project.equipment = self.equipment.to_vec();
        project.techniques = self.techniques.to_vec();
        project.updates = self.updates.to_vec();
        project
    }

    /// Check the required fields and hand the draft over.
    pub fn submit(self) -> Result<Submission, EditorError> {
        if self.draft.title.trim().is_empty() {
            return Err(EditorError::MissingField("title"));
        }
        if self.draft.category.trim().is_empty() {
            return Err(EditorError::MissingField("category"));
        }
        if self.draft.description.trim().is_empty() {
            return Err(EditorError::MissingField("description"));
        }
        if !self.categories.iter().any(|c| *c == self.draft.category) {
            return Err(EditorError::UnknownCategory(self.draft.category.clone()));
        }

        debug!(id = self.draft.id, mode = ?self.mode, "Submitting project draft");
        Ok(Submission {
            project: self.preview(),
            mode: self.mode,
        })
    }

    /// Throw the draft away.
    pub fn cancel(self) {
        debug!(id = self.draft.id, "Project draft discarded");
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed::seed_projects;

    fn categories() -> Vec<String> {
        vec!["knitting".to_string(), "embroidery".to_string()]
    }

    fn png(name: &str) -> Upload {
        Upload {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn create_mode_starts_from_defaults() {
        let editor = ProjectEditor::create(42, categories());
        let draft = editor.preview();

        assert_eq!(editor.mode(), EditorMode::Create);
        assert_eq!(draft.id, 42);
        assert_eq!(draft.status, ProjectStatus::Planning);
        assert_eq!(draft.difficulty, Difficulty::Beginner);
        assert_eq!(draft.estimated_hours, 0);
        assert!(draft.materials.is_empty() && draft.updates.is_empty() && draft.images.is_empty());
        assert_eq!(editor.categories(), categories().as_slice());
    }

    #[test]
    fn edit_mode_round_trips_untouched_project() {
        let project = seed_projects().remove(0);
        let editor = ProjectEditor::edit(project.clone(), categories());

        assert_eq!(editor.mode(), EditorMode::Edit { original_id: project.id });
        assert_eq!(editor.materials().len(), 2);
        assert_eq!(editor.submit().unwrap().project, project);
    }

    #[test]
    fn append_then_remove_material_restores_collection() {
        let project = seed_projects().remove(0);
        let mut editor = ProjectEditor::edit(project.clone(), categories());

        let id = editor.add_material();
        assert!(editor.update_material(id, MaterialField::Cost(3.5)));
        assert_eq!(editor.materials().len(), 3);

        let removed = editor.remove_material(id).unwrap();
        assert_eq!(removed.cost, 3.5);
        assert_eq!(editor.preview().materials, project.materials);
    }

    #[test]
    fn handles_survive_removal_of_earlier_elements() {
        let mut editor = ProjectEditor::create(1, categories());
        let first = editor.add_material();
        let second = editor.add_material();

        editor.remove_material(first);
        assert!(editor.update_material(second, MaterialField::Name("Linen".to_string())));

        assert_eq!(editor.materials().handle_at(0), Some(second));
        assert_eq!(editor.preview().materials[0].name, "Linen");
    }

    #[test]
    fn stale_or_out_of_range_targets_are_no_ops() {
        let mut editor = ProjectEditor::create(1, categories());
        let id = editor.add_equipment();
        editor.remove_equipment(id);

        assert!(!editor.update_equipment(id, EquipmentField::Name("Hoop".to_string())));
        assert!(editor.equipment().handle_at(5).is_none());
        assert!(editor.remove_equipment(id).is_none());
        assert!(editor.preview().equipment.is_empty());
    }

    #[test]
    fn techniques_ignore_dismissed_prompts() {
        let mut editor = ProjectEditor::create(1, categories());

        assert!(editor.add_technique(None).is_none());
        assert!(editor.add_technique(Some("")).is_none());
        let id = editor.add_technique(Some("Seed stitch")).unwrap();
        editor.add_technique(Some("Cable"));
        editor.remove_technique(id);

        assert_eq!(editor.preview().techniques, vec!["Cable".to_string()]);
    }

    #[test]
    fn new_update_is_dated_today_and_editable() {
        let mut editor = ProjectEditor::create(1, categories());
        let id = editor.add_update();
        editor.update_update(id, UpdateField::Title("Cast on".to_string()));
        editor.update_update(id, UpdateField::TimeSpent(1.5));

        let update = &editor.preview().updates[0];
        assert_eq!(update.date, Utc::now().format("%Y-%m-%d").to_string());
        assert_eq!(update.title, "Cast on");
        assert_eq!(update.time_spent, 1.5);
        assert_eq!(update.photos, Some(Vec::new()));
    }

    #[test]
    fn images_go_to_the_requested_target() {
        let mut editor = ProjectEditor::create(1, categories());
        let update = editor.add_update();
        let text = Upload {
            file_name: "notes.txt".to_string(),
            content_type: "text/plain".to_string(),
            bytes: b"hello".to_vec(),
        };

        assert_eq!(editor.ingest_images(vec![png("a.png"), text], MediaTarget::Project), 1);
        assert_eq!(editor.ingest_images(vec![png("b.png"), png("c.png")], MediaTarget::Update(update)), 2);

        let draft = editor.preview();
        assert_eq!(draft.images.len(), 1);
        assert!(draft.images[0].starts_with("data:image/png;base64,"));
        assert_eq!(draft.updates[0].photos.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn images_for_a_removed_update_are_dropped() {
        let mut editor = ProjectEditor::create(1, categories());
        let update = editor.add_update();
        editor.remove_update(update);

        assert_eq!(editor.ingest_images(vec![png("a.png")], MediaTarget::Update(update)), 0);
        assert!(editor.preview().images.is_empty());
    }

    #[test]
    fn submit_requires_title_category_and_description() {
        let mut editor = ProjectEditor::create(1, categories());
        editor.set(ProjectField::Title("Test".to_string()));
        editor.set(ProjectField::Category("knitting".to_string()));
        assert_eq!(
            editor.clone().submit().unwrap_err(),
            EditorError::MissingField("description")
        );

        editor.set(ProjectField::Description("d".to_string()));
        let submission = editor.submit().unwrap();
        assert_eq!(submission.mode, EditorMode::Create);
        assert_eq!(submission.project.title, "Test");
    }

    #[test]
    fn submit_rejects_category_outside_the_set() {
        let mut editor = ProjectEditor::create(1, categories());
        editor.set(ProjectField::Title("Test".to_string()));
        editor.set(ProjectField::Description("d".to_string()));
        editor.set(ProjectField::Category("tatting".to_string()));

        assert_eq!(
            editor.clone().submit().unwrap_err(),
            EditorError::UnknownCategory("tatting".to_string())
        );

        editor.set(ProjectField::Category("embroidery".to_string()));
        assert_eq!(editor.submit().unwrap().project.category, "embroidery");
    }

    #[test]
    fn empty_optional_strings_are_cleared() {
        let mut editor = ProjectEditor::create(1, categories());
        editor.set(ProjectField::CompletionDate(Some("2024-01-01".to_string())));
        editor.set(ProjectField::CompletionDate(Some(String::new())));
        editor.set(ProjectField::EtsyLink(Some(String::new())));

        let draft = editor.preview();
        assert!(draft.completion_date.is_none());
        assert!(draft.etsy_link.is_none());
    }

    #[test]
    fn replace_draft_keeps_identity() {
        let project = seed_projects().remove(1);
        let mut editor = ProjectEditor::edit(project.clone(), categories());
        let input = ProjectInput {
            title: "Renamed".to_string(),
            materials: vec![Material::default()],
            ..ProjectInput::default()
        };

        editor.replace_draft(input);

        let draft = editor.preview();
        assert_eq!(draft.id, project.id);
        assert_eq!(draft.title, "Renamed");
        assert_eq!(editor.materials().len(), 1);
        assert_eq!(editor.mode(), EditorMode::Edit { original_id: project.id });
    }
}
