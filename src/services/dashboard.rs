use std::sync::Arc;
use chrono::{Datelike, Utc};
use tracing::{info, warn};
use crate::errors::{DashboardError, RepositoryError};
use crate::models::{DashboardStats, Milestone, Project, ProjectId, SiteContent, Skill};
use super::auth_service::{CredentialVerifier, SessionRegistry, SessionToken};
use super::categories::CategorySet;
use super::content_store::ContentStore;
use super::project_editor::{EditorMode, ProjectEditor, Submission};
use super::project_repository::ProjectRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(ProjectId),
    Updated(ProjectId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkillField {
    Name(String),
    /// Clamped to 0-100.
    Level(u8),
    Years(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MilestoneField {
    Year(String),
    Title(String),
    Description(String),
}

/// Admin side of the site: sign-in, categories, the project list and the
/// About-page draft.
pub struct AdminDashboard {
    repository: Box<dyn ProjectRepository>,
    categories: CategorySet,
    verifier: Box<dyn CredentialVerifier>,
    sessions: SessionRegistry,
    store: Arc<ContentStore>,
    site_content: Option<SiteContent>,
}

impl AdminDashboard {
    pub fn new(
        repository: Box<dyn ProjectRepository>,
        store: Arc<ContentStore>,
        verifier: Box<dyn CredentialVerifier>,
    ) -> Result<Self, DashboardError> {
        let categories = repository.categories()?;
        let site_content = match store.load() {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Site content unavailable, editing disabled until reload: {}", e);
                None
            }
        };

        Ok(Self {
            repository,
            categories,
            verifier,
            sessions: SessionRegistry::default(),
            store,
            site_content,
        })
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    pub fn sign_in(&mut self, username: &str, password: &str) -> Result<SessionToken, DashboardError> {
        if !self.verifier.verify(username, password) {
            warn!("Rejected admin sign-in");
            return Err(DashboardError::InvalidCredentials);
        }
        info!("Admin signed in");
        Ok(self.sessions.issue())
    }

    pub fn sign_out(&mut self, token: &SessionToken) {
        if self.sessions.revoke(token) {
            info!("Admin signed out");
        }
    }

    pub fn authorize(&self, token: &SessionToken) -> Result<(), DashboardError> {
        if self.sessions.is_active(token) {
            Ok(())
        } else {
            Err(DashboardError::Unauthenticated)
        }
    }

    // ========================================================================
    // Categories
    // ========================================================================

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn add_category(&mut self, name: &str) -> Result<String, DashboardError> {
        let mut next = self.categories.clone();
        let added = next.add(name)?.to_string();
        self.commit_categories(next)?;
        info!(category = %added, "Category added");
        Ok(added)
    }

    pub fn rename_category(&mut self, index: usize, name: &str) -> Result<(), DashboardError> {
        let mut next = self.categories.clone();
        next.rename(index, name)?;
        self.commit_categories(next)
    }

    /// Delete the category at `index`. Refused while any project is filed
    /// under it; otherwise `confirm` gets the final say.
    pub fn delete_category(
        &mut self,
        index: usize,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<String, DashboardError> {
        let projects = self.repository.list()?;
        let mut next = self.categories.clone();
        let removed = next.delete(
            index,
            |name| projects.iter().any(|p| p.category == name),
            confirm,
        )?;
        self.commit_categories(next)?;
        info!(category = %removed, "Category deleted");
        Ok(removed)
    }

    fn commit_categories(&mut self, next: CategorySet) -> Result<(), DashboardError> {
        self.repository.store_categories(&next)?;
        self.categories = next;
        Ok(())
    }

    // ========================================================================
    // Projects
    // ========================================================================

    pub fn projects(&self) -> Result<Vec<Project>, DashboardError> {
        Ok(self.repository.list()?)
    }

    pub fn project(&self, id: ProjectId) -> Result<Project, DashboardError> {
        self.repository
            .get(id)?
            .ok_or(DashboardError::ProjectNotFound(id))
    }

    /// Flip the featured flag; returns the new value.
    pub fn toggle_featured(&mut self, id: ProjectId) -> Result<bool, DashboardError> {
        let mut project = self.project(id)?;
        project.is_featured = !project.is_featured;
        let featured = project.is_featured;
        self.repository.update(project)?;
        Ok(featured)
    }

    pub fn delete_project(
        &mut self,
        id: ProjectId,
        confirm: impl FnOnce(&Project) -> bool,
    ) -> Result<Project, DashboardError> {
        let project = self.project(id)?;
        if !confirm(&project) {
            return Err(DashboardError::Declined(id));
        }
        self.repository.delete(id)?;
        info!(id, "Project deleted");
        Ok(project)
    }

    pub fn new_project_editor(&self) -> Result<ProjectEditor, DashboardError> {
        let id = self.repository.next_id()?;
        Ok(ProjectEditor::create(id, self.categories.to_vec()))
    }

    pub fn edit_project(&self, id: ProjectId) -> Result<ProjectEditor, DashboardError> {
        let project = self.project(id)?;
        Ok(ProjectEditor::edit(project, self.categories.to_vec()))
    }

    /// Store a submitted draft. Whether it replaces a record or adds one is
    /// decided by how the editor was opened, never by looking at the id.
    pub fn save_project(&mut self, submission: Submission) -> Result<SaveOutcome, DashboardError> {
        let id = submission.project.id;
        match submission.mode {
            EditorMode::Edit { .. } => {
                self.repository
                    .update(submission.project)
                    .map_err(|e| match e {
                        RepositoryError::NotFound(id) => DashboardError::ProjectNotFound(id),
                        other => other.into(),
                    })?;
                info!(id, "Project updated");
                Ok(SaveOutcome::Updated(id))
            }
            EditorMode::Create => {
                self.repository.insert(submission.project)?;
                info!(id, "Project created");
                Ok(SaveOutcome::Created(id))
            }
        }
    }

    pub fn stats(&self) -> Result<DashboardStats, DashboardError> {
        let projects = self.repository.list()?;
        Ok(DashboardStats {
            total_projects: projects.len(),
            featured_projects: projects.iter().filter(|p| p.is_featured).count(),
            total_hours: projects.iter().map(|p| u64::from(p.counted_hours())).sum(),
            total_material_cost: projects.iter().map(Project::material_cost).sum(),
        })
    }

    // ========================================================================
    // Site content draft
    // ========================================================================

    pub fn site_content(&self) -> Option<&SiteContent> {
        self.site_content.as_ref()
    }

    fn draft_mut(&mut self) -> Result<&mut SiteContent, DashboardError> {
        self.site_content
            .as_mut()
            .ok_or(DashboardError::ContentNotLoaded)
    }

    /// Swap in a whole draft edited elsewhere.
    pub fn replace_site_content(&mut self, content: SiteContent) {
        self.site_content = Some(content);
    }

    /// Re-read the stored document, dropping unpublished edits.
    pub fn reload_site_content(&mut self) -> Result<&SiteContent, DashboardError> {
        let content = self.store.load()?;
        Ok(&*self.site_content.insert(content))
    }

    /// Write the draft to the content store, replacing the stored document.
    pub fn publish_site_content(&mut self) -> Result<(), DashboardError> {
        let content = self
            .site_content
            .as_ref()
            .ok_or(DashboardError::ContentNotLoaded)?;
        self.store.save(content)?;
        Ok(())
    }

    pub fn add_paragraph(&mut self) -> Result<usize, DashboardError> {
        let draft = self.draft_mut()?;
        draft.my_journey.push(String::new());
        Ok(draft.my_journey.len() - 1)
    }

    pub fn update_paragraph(&mut self, index: usize, text: &str) -> Result<bool, DashboardError> {
        Ok(match self.draft_mut()?.my_journey.get_mut(index) {
            Some(paragraph) => {
                *paragraph = text.to_string();
                true
            }
            None => false,
        })
    }

    pub fn remove_paragraph(&mut self, index: usize) -> Result<bool, DashboardError> {
        Ok(remove_at(&mut self.draft_mut()?.my_journey, index))
    }

    pub fn add_skill(&mut self) -> Result<usize, DashboardError> {
        let draft = self.draft_mut()?;
        draft.skills.push(Skill::placeholder());
        Ok(draft.skills.len() - 1)
    }

    pub fn update_skill(&mut self, index: usize, field: SkillField) -> Result<bool, DashboardError> {
        let Some(skill) = self.draft_mut()?.skills.get_mut(index) else {
            return Ok(false);
        };
        match field {
            SkillField::Name(v) => skill.name = v,
            SkillField::Level(v) => skill.level = v.min(100),
            SkillField::Years(v) => skill.years = v,
        }
        Ok(true)
    }

    pub fn remove_skill(&mut self, index: usize) -> Result<bool, DashboardError> {
        Ok(remove_at(&mut self.draft_mut()?.skills, index))
    }

    /// Append a placeholder milestone for the current year.
    pub fn add_milestone(&mut self) -> Result<usize, DashboardError> {
        let year = Utc::now().year();
        let draft = self.draft_mut()?;
        draft.milestones.push(Milestone::placeholder(year));
        Ok(draft.milestones.len() - 1)
    }

    pub fn update_milestone(&mut self, index: usize, field: MilestoneField) -> Result<bool, DashboardError> {
        let Some(milestone) = self.draft_mut()?.milestones.get_mut(index) else {
            return Ok(false);
        };
        match field {
            MilestoneField::Year(v) => milestone.year = v,
            MilestoneField::Title(v) => milestone.title = v,
            MilestoneField::Description(v) => milestone.description = v,
        }
        Ok(true)
    }

    pub fn remove_milestone(&mut self, index: usize) -> Result<bool, DashboardError> {
        Ok(remove_at(&mut self.draft_mut()?.milestones, index))
    }

    /// Swap with the previous milestone. The first one stays put.
    pub fn move_milestone_up(&mut self, index: usize) -> Result<bool, DashboardError> {
        let milestones = &mut self.draft_mut()?.milestones;
        if index == 0 || index >= milestones.len() {
            return Ok(false);
        }
        milestones.swap(index, index - 1);
        Ok(true)
    }

    /// Swap with the next milestone. The last one stays put.
    pub fn move_milestone_down(&mut self, index: usize) -> Result<bool, DashboardError> {
        let milestones = &mut self.draft_mut()?.milestones;
        if index + 1 >= milestones.len() {
            return Ok(false);
        }
        milestones.swap(index, index + 1);
        Ok(true)
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> bool {
    if index < items.len() {
        items.remove(index);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CategoryError, EditorError};
    use crate::services::auth_service::BcryptCredentials;
    use crate::services::project_editor::{MaterialField, ProjectField};
    use crate::services::project_repository::InMemoryProjectRepository;
    use crate::services::seed::seed_projects;
    use serde_json::json;

    struct Fixture {
        _dir: tempfile::TempDir,
        store: Arc<ContentStore>,
        dashboard: AdminDashboard,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ContentStore::in_dir(dir.path()));
        let verifier = BcryptCredentials::new("judi", bcrypt::hash("secret", 4).unwrap());
        let dashboard = AdminDashboard::new(
            Box::new(InMemoryProjectRepository::seeded()),
            store.clone(),
            Box::new(verifier),
        )
        .unwrap();
        Fixture { _dir: dir, store, dashboard }
    }

    #[test]
    fn sign_in_issues_a_session_and_sign_out_ends_it() {
        let mut f = fixture();

        assert!(matches!(
            f.dashboard.sign_in("judi", "nope"),
            Err(DashboardError::InvalidCredentials)
        ));

        let token = f.dashboard.sign_in("judi", "secret").unwrap();
        f.dashboard.authorize(&token).unwrap();

        f.dashboard.sign_out(&token);
        assert!(matches!(
            f.dashboard.authorize(&token),
            Err(DashboardError::Unauthenticated)
        ));
    }

    #[test]
    fn deleting_a_category_in_use_leaves_the_set_unchanged() {
        let mut f = fixture();
        let before = f.dashboard.categories().clone();
        let knitting = before.as_slice().iter().position(|c| c == "knitting").unwrap();

        let err = f.dashboard.delete_category(knitting, |_| true).unwrap_err();

        assert!(matches!(err, DashboardError::Category(CategoryError::InUse(_))));
        assert_eq!(f.dashboard.categories(), &before);
    }

    #[test]
    fn unused_category_is_deleted_after_confirmation() {
        let mut f = fixture();
        let macrame = f.dashboard.categories().as_slice().iter().position(|c| c == "macrame").unwrap();

        assert_eq!(f.dashboard.delete_category(macrame, |_| true).unwrap(), "macrame");
        assert!(!f.dashboard.categories().contains("macrame"));
    }

    #[test]
    fn rename_rules_follow_the_category_set() {
        let mut f = fixture();
        // 0 = embroidery, 1 = knitting
        assert!(f.dashboard.rename_category(0, "Knitting").is_err());
        f.dashboard.rename_category(1, "knitting").unwrap();
        assert_eq!(f.dashboard.categories().get(1), Some("knitting"));
    }

    #[test]
    fn creating_a_project_adds_exactly_one_with_a_fresh_id() {
        let mut f = fixture();
        let before = f.dashboard.projects().unwrap();

        let mut editor = f.dashboard.new_project_editor().unwrap();
        editor.set(ProjectField::Title("Test".to_string()));
        editor.set(ProjectField::Category("knitting".to_string()));
        editor.set(ProjectField::Description("d".to_string()));
        let outcome = f.dashboard.save_project(editor.submit().unwrap()).unwrap();

        let after = f.dashboard.projects().unwrap();
        assert_eq!(after.len(), before.len() + 1);
        let SaveOutcome::Created(id) = outcome else {
            panic!("expected a create, got {:?}", outcome);
        };
        assert!(before.iter().all(|p| p.id != id));
        assert_eq!(after.last().map(|p| p.title.as_str()), Some("Test"));
    }

    #[test]
    fn editing_replaces_only_that_record_in_place() {
        let mut f = fixture();
        let before = f.dashboard.projects().unwrap();

        let mut editor = f.dashboard.edit_project(2).unwrap();
        editor.set(ProjectField::EstimatedHours(99));
        assert_eq!(
            f.dashboard.save_project(editor.submit().unwrap()).unwrap(),
            SaveOutcome::Updated(2)
        );

        let after = f.dashboard.projects().unwrap();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[1].estimated_hours, 99);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn editor_validation_errors_surface() {
        let f = fixture();
        let editor = f.dashboard.new_project_editor().unwrap();
        let err = editor.submit().unwrap_err();
        assert_eq!(err, EditorError::MissingField("title"));
        assert_eq!(f.dashboard.projects().unwrap().len(), 3);
        // a cancelled editor leaves nothing behind either
        f.dashboard.new_project_editor().unwrap().cancel();
        assert_eq!(f.dashboard.projects().unwrap().len(), 3);
    }

    #[test]
    fn toggling_featured_twice_restores_the_flag() {
        let mut f = fixture();
        let original = f.dashboard.project(1).unwrap().is_featured;

        assert_eq!(f.dashboard.toggle_featured(1).unwrap(), !original);
        assert_eq!(f.dashboard.toggle_featured(1).unwrap(), original);
        assert_eq!(f.dashboard.project(1).unwrap().is_featured, original);
    }

    #[test]
    fn project_deletion_needs_confirmation() {
        let mut f = fixture();

        assert!(matches!(
            f.dashboard.delete_project(3, |_| false),
            Err(DashboardError::Declined(3))
        ));
        assert_eq!(f.dashboard.projects().unwrap().len(), 3);

        let removed = f.dashboard.delete_project(3, |p| p.title.contains("Quilt")).unwrap();
        assert_eq!(removed.id, 3);
        assert!(matches!(
            f.dashboard.project(3),
            Err(DashboardError::ProjectNotFound(3))
        ));
    }

    #[test]
    fn stats_use_actual_hours_when_logged() {
        let f = fixture();
        let stats = f.dashboard.stats().unwrap();

        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.featured_projects, 2);
        // 28 actual + 20 estimated + 60 estimated
        assert_eq!(stats.total_hours, 108);
        assert!((stats.total_material_cost - (24.99 + 15.50 + 32.00)).abs() < 1e-9);
    }

    #[test]
    fn material_cost_changes_flow_into_stats() {
        let mut f = fixture();
        let mut editor = f.dashboard.edit_project(3).unwrap();
        let id = editor.add_material();
        editor.update_material(id, MaterialField::Cost(10.0));
        f.dashboard.save_project(editor.submit().unwrap()).unwrap();

        let stats = f.dashboard.stats().unwrap();
        assert!((stats.total_material_cost - (24.99 + 15.50 + 32.00 + 10.0)).abs() < 1e-9);
    }

    #[test]
    fn milestones_move_between_neighbours() {
        let mut f = fixture();
        for title in ["a", "b", "c"] {
            let index = f.dashboard.add_milestone().unwrap();
            f.dashboard
                .update_milestone(index, MilestoneField::Title(title.to_string()))
                .unwrap();
        }

        assert!(!f.dashboard.move_milestone_up(0).unwrap());
        assert!(!f.dashboard.move_milestone_down(2).unwrap());
        assert!(f.dashboard.move_milestone_up(2).unwrap());
        assert!(f.dashboard.move_milestone_down(0).unwrap());

        let titles: Vec<_> = f
            .dashboard
            .site_content()
            .unwrap()
            .milestones
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[test]
    fn new_entries_use_placeholders() {
        let mut f = fixture();
        let skill = f.dashboard.add_skill().unwrap();
        let milestone = f.dashboard.add_milestone().unwrap();
        f.dashboard.update_skill(skill, SkillField::Level(250)).unwrap();

        let content = f.dashboard.site_content().unwrap();
        assert_eq!(content.skills[skill].name, "New Skill");
        assert_eq!(content.skills[skill].level, 100);
        assert_eq!(content.milestones[milestone].year, Utc::now().year().to_string());
        assert_eq!(content.milestones[milestone].title, "New Milestone");
    }

    #[test]
    fn paragraph_edits_ignore_missing_indices() {
        let mut f = fixture();
        let index = f.dashboard.add_paragraph().unwrap();

        assert!(f.dashboard.update_paragraph(index, "I learned from my gran.").unwrap());
        assert!(!f.dashboard.update_paragraph(9, "x").unwrap());
        assert!(!f.dashboard.remove_paragraph(9).unwrap());
        assert_eq!(f.dashboard.site_content().unwrap().my_journey, vec!["I learned from my gran."]);
    }

    #[test]
    fn reload_discards_unpublished_edits_and_publish_persists() {
        let mut f = fixture();
        f.dashboard.add_paragraph().unwrap();
        f.dashboard.reload_site_content().unwrap();
        assert!(f.dashboard.site_content().unwrap().my_journey.is_empty());

        let index = f.dashboard.add_paragraph().unwrap();
        f.dashboard.update_paragraph(index, "Published").unwrap();
        f.dashboard.publish_site_content().unwrap();

        assert_eq!(f.store.read().unwrap()["myJourney"], json!(["Published"]));
    }

    #[test]
    fn save_in_edit_mode_for_vanished_project_is_not_found() {
        let mut f = fixture();
        let editor = f.dashboard.edit_project(1).unwrap();
        f.dashboard.delete_project(1, |_| true).unwrap();

        let mut submission = editor.submit().unwrap();
        submission.project.title = "Ghost".to_string();
        assert!(matches!(
            f.dashboard.save_project(submission),
            Err(DashboardError::ProjectNotFound(1))
        ));
    }

    #[test]
    fn loosely_typed_stored_content_is_still_editable() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ContentStore::in_dir(dir.path()));
        store
            .replace(Some(json!({
                "myJourney": ["kept"],
                "skills": [{ "name": "x", "level": "high" }],
                "milestones": [{ "year": 2020, "title": "First show", "description": "" }]
            })))
            .unwrap();

        let mut dashboard = AdminDashboard::new(
            Box::new(InMemoryProjectRepository::seeded()),
            store,
            Box::new(BcryptCredentials::new("judi", "unused")),
        )
        .unwrap();

        let draft = dashboard.site_content().unwrap();
        assert_eq!(draft.skills[0].name, "x");
        assert_eq!(draft.milestones[0].year, "2020");

        assert_eq!(dashboard.reload_site_content().unwrap().my_journey, vec!["kept"]);
        assert!(dashboard.add_milestone().is_ok());
    }

    #[test]
    fn seed_matches_fixture() {
        let f = fixture();
        assert_eq!(f.dashboard.projects().unwrap(), seed_projects());
    }
}
