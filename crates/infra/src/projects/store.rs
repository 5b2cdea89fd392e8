use async_trait::async_trait;

use sponsorship_core::{ProjectId, UserId};

use super::types::{NewProject, ProjectPatch, ProjectSummary, Technology};
use crate::ModelResult;

/// Statement-level access to `PROJECT`, `TECHNOLOGY` and their link table.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Projects of one camper, ordered by id.
    async fn projects_by_camper(&self, camper_id: UserId) -> ModelResult<Vec<ProjectSummary>>;

    /// Technologies linked to a project, ordered by name.
    async fn technologies_for_project(&self, project_id: ProjectId) -> ModelResult<Vec<Technology>>;

    /// Insert the project and its technology links. Returns the new id.
    async fn insert_project(&self, project: &NewProject) -> ModelResult<ProjectId>;

    /// Patch a project, scoped to its camper. Returns rows affected.
    async fn patch_project(
        &self,
        camper_id: UserId,
        project_id: ProjectId,
        patch: &ProjectPatch,
    ) -> ModelResult<u64>;

    async fn find_project(
        &self,
        camper_id: UserId,
        project_id: ProjectId,
    ) -> ModelResult<Option<ProjectSummary>>;
}
