use std::sync::Arc;

use sponsorship_auth::{authorize_owner_or_admin, Principal};
use sponsorship_core::{ProjectId, UserId};

use super::store::ProjectStore;
use super::types::{NewProject, ProjectPatch, ProjectSummary, Technology};
use crate::{ModelError, ModelResult};

#[derive(Clone)]
pub struct ProjectModel {
    store: Arc<dyn ProjectStore>,
}

fn validate_name(name: &str) -> ModelResult<()> {
    if name.trim().is_empty() {
        return Err(ModelError::validation("project name must not be empty"));
    }
    Ok(())
}

impl ProjectModel {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    pub async fn projects_by_camper(&self, camper_id: UserId) -> ModelResult<Vec<ProjectSummary>> {
        self.store
            .projects_by_camper(camper_id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %camper_id, "projects_by_camper failed"))
    }

    pub async fn project_technologies(&self, project_id: ProjectId) -> ModelResult<Vec<Technology>> {
        self.store
            .technologies_for_project(project_id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %project_id, "project_technologies failed"))
    }

    /// Create a project owned by `data.camper_id`; only that camper or an admin may.
    pub async fn add_project_for_camper(
        &self,
        data: NewProject,
        requester: &Principal,
    ) -> ModelResult<ProjectSummary> {
        authorize_owner_or_admin(requester, data.camper_id, "create")?;
        validate_name(&data.name)?;

        let project_id = self
            .store
            .insert_project(&data)
            .await
            .inspect_err(|e| tracing::error!(error = %e, camper_id = %data.camper_id, "add_project_for_camper failed"))?;

        tracing::info!(%project_id, camper_id = %data.camper_id, "project created");
        Ok(ProjectSummary {
            project_id,
            camper_id: data.camper_id,
            name: data.name,
            description: data.description,
            repository_url: data.repository_url,
        })
    }

    pub async fn update_project_for_camper(
        &self,
        camper_id: UserId,
        project_id: ProjectId,
        patch: ProjectPatch,
        requester: &Principal,
    ) -> ModelResult<ProjectSummary> {
        authorize_owner_or_admin(requester, camper_id, "update")?;
        if patch.is_empty() {
            return Err(ModelError::validation("no fields to update"));
        }
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }

        let affected = self
            .store
            .patch_project(camper_id, project_id, &patch)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %camper_id, %project_id, "update_project_for_camper failed"))?;
        if affected == 0 {
            return Err(ModelError::NotFound("project"));
        }

        self.store
            .find_project(camper_id, project_id)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, %camper_id, %project_id, "update_project_for_camper re-read failed")
            })?
            .ok_or(ModelError::NotFound("project"))
    }
}

#[cfg(test)]
mod tests {
    use sponsorship_auth::Role;
    use sponsorship_core::TechnologyId;

    use super::*;
    use crate::projects::InMemoryProjectStore;

    fn model() -> ProjectModel {
        ProjectModel::new(Arc::new(InMemoryProjectStore::with_default_technologies()))
    }

    fn camper(id: i64) -> Principal {
        Principal::new(UserId::from_raw(id), Role::Camper)
    }

    fn new_project(camper_id: i64, name: &str, techs: &[i64]) -> NewProject {
        NewProject {
            camper_id: UserId::from_raw(camper_id),
            name: name.into(),
            description: Some("A project".into()),
            repository_url: None,
            technology_ids: techs.iter().copied().map(TechnologyId::from_raw).collect(),
        }
    }

    #[tokio::test]
    async fn camper_creates_and_lists_own_projects() {
        let m = model();
        let created = m
            .add_project_for_camper(new_project(10, "Tracker", &[5, 1]), &camper(10))
            .await
            .unwrap();
        m.add_project_for_camper(new_project(11, "Other", &[]), &camper(11))
            .await
            .unwrap();

        let projects = m.projects_by_camper(UserId::from_raw(10)).await.unwrap();
        assert_eq!(projects, vec![created.clone()]);

        let names: Vec<String> = m
            .project_technologies(created.project_id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["JavaScript".to_string(), "Rust".to_string()]);
    }

    #[tokio::test]
    async fn camper_cannot_create_for_someone_else() {
        let err = model()
            .add_project_for_camper(new_project(10, "Tracker", &[]), &camper(11))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Permission(_)));
    }

    #[tokio::test]
    async fn blank_name_and_unknown_technology_are_rejected() {
        let m = model();
        let blank = m
            .add_project_for_camper(new_project(10, "  ", &[]), &camper(10))
            .await
            .unwrap_err();
        assert!(matches!(blank, ModelError::Validation(_)));

        let unknown = m
            .add_project_for_camper(new_project(10, "X", &[42]), &camper(10))
            .await
            .unwrap_err();
        assert!(matches!(unknown, ModelError::Validation(_)));
    }

    #[tokio::test]
    async fn update_patches_only_present_fields() {
        let m = model();
        let created = m
            .add_project_for_camper(new_project(10, "Tracker", &[]), &camper(10))
            .await
            .unwrap();

        let patch = ProjectPatch {
            repository_url: Some(Some("https://git.example/tracker".into())),
            ..ProjectPatch::default()
        };
        let updated = m
            .update_project_for_camper(created.camper_id, created.project_id, patch, &camper(10))
            .await
            .unwrap();

        assert_eq!(updated.name, "Tracker");
        assert_eq!(updated.description.as_deref(), Some("A project"));
        assert_eq!(updated.repository_url.as_deref(), Some("https://git.example/tracker"));
    }

    #[tokio::test]
    async fn update_under_wrong_camper_is_not_found() {
        let m = model();
        let created = m
            .add_project_for_camper(new_project(10, "Tracker", &[]), &camper(10))
            .await
            .unwrap();
        let admin = Principal::new(UserId::from_raw(1), Role::Admin);

        let patch = ProjectPatch {
            name: Some("Hijack".into()),
            ..ProjectPatch::default()
        };
        let err = m
            .update_project_for_camper(UserId::from_raw(11), created.project_id, patch, &admin)
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::NotFound("project")));
    }

    struct VanishingStore;

    #[async_trait::async_trait]
    impl ProjectStore for VanishingStore {
        async fn projects_by_camper(&self, _: UserId) -> ModelResult<Vec<ProjectSummary>> {
            Ok(Vec::new())
        }

        async fn technologies_for_project(&self, _: ProjectId) -> ModelResult<Vec<Technology>> {
            Ok(Vec::new())
        }

        async fn insert_project(&self, _: &NewProject) -> ModelResult<ProjectId> {
            Ok(ProjectId::from_raw(1))
        }

        async fn patch_project(&self, _: UserId, _: ProjectId, _: &ProjectPatch) -> ModelResult<u64> {
            Ok(1)
        }

        async fn find_project(&self, _: UserId, _: ProjectId) -> ModelResult<Option<ProjectSummary>> {
            Err(ModelError::query("project row: column \"name\" not found"))
        }
    }

    #[tokio::test]
    async fn failed_re_read_after_update_is_propagated() {
        let m = ProjectModel::new(Arc::new(VanishingStore));
        let patch = ProjectPatch {
            name: Some("Renamed".into()),
            ..ProjectPatch::default()
        };
        let err = m
            .update_project_for_camper(UserId::from_raw(10), ProjectId::from_raw(1), patch, &camper(10))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Query(_)));
    }
}
