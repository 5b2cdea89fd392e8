//! In-memory project store for tests/dev.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use async_trait::async_trait;

use sponsorship_core::{ProjectId, TechnologyId, UserId};

use super::store::ProjectStore;
use super::types::{NewProject, ProjectPatch, ProjectSummary, Technology};
use crate::{ModelError, ModelResult};

/// Technology labels seeded by the bootstrap schema.
pub const DEFAULT_TECHNOLOGIES: &[&str] = &["JavaScript", "Node.js", "MySQL", "React", "Rust"];

#[derive(Debug, Default)]
struct Tables {
    projects: BTreeMap<ProjectId, ProjectSummary>,
    technologies: BTreeMap<TechnologyId, String>,
    links: BTreeSet<(ProjectId, TechnologyId)>,
    last_project_id: i64,
}

#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    inner: RwLock<Tables>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_technologies() -> Self {
        Self::with_technologies(DEFAULT_TECHNOLOGIES)
    }

    /// Technology rows get ids `1..` in the given order.
    pub fn with_technologies(names: &[&str]) -> Self {
        let tables = Tables {
            technologies: (1..)
                .zip(names)
                .map(|(id, name)| (TechnologyId::from_raw(id), name.to_string()))
                .collect(),
            ..Tables::default()
        };
        Self {
            inner: RwLock::new(tables),
        }
    }

    fn read(&self) -> ModelResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| ModelError::query("in-memory project table lock poisoned"))
    }

    fn write(&self) -> ModelResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| ModelError::query("in-memory project table lock poisoned"))
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn projects_by_camper(&self, camper_id: UserId) -> ModelResult<Vec<ProjectSummary>> {
        let t = self.read()?;
        Ok(t.projects
            .values()
            .filter(|p| p.camper_id == camper_id)
            .cloned()
            .collect())
    }

    async fn technologies_for_project(&self, project_id: ProjectId) -> ModelResult<Vec<Technology>> {
        let t = self.read()?;
        let mut technologies: Vec<Technology> = t
            .links
            .iter()
            .filter(|(p, _)| *p == project_id)
            .filter_map(|(_, tech)| {
                t.technologies.get(tech).map(|name| Technology {
                    technology_id: *tech,
                    name: name.clone(),
                })
            })
            .collect();
        technologies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(technologies)
    }

    async fn insert_project(&self, project: &NewProject) -> ModelResult<ProjectId> {
        let mut t = self.write()?;
        if let Some(missing) = project
            .technology_ids
            .iter()
            .find(|id| !t.technologies.contains_key(*id))
        {
            return Err(ModelError::validation(format!("unknown technology {missing}")));
        }

        t.last_project_id += 1;
        let id = ProjectId::from_raw(t.last_project_id);
        t.projects.insert(
            id,
            ProjectSummary {
                project_id: id,
                camper_id: project.camper_id,
                name: project.name.clone(),
                description: project.description.clone(),
                repository_url: project.repository_url.clone(),
            },
        );
        for tech in &project.technology_ids {
            t.links.insert((id, *tech));
        }
        Ok(id)
    }

    async fn patch_project(
        &self,
        camper_id: UserId,
        project_id: ProjectId,
        patch: &ProjectPatch,
    ) -> ModelResult<u64> {
        if patch.is_empty() {
            return Err(ModelError::validation("no fields to update"));
        }

        let mut t = self.write()?;
        let Some(p) = t
            .projects
            .get_mut(&project_id)
            .filter(|p| p.camper_id == camper_id)
        else {
            return Ok(0);
        };

        if let Some(v) = &patch.name {
            p.name = v.clone();
        }
        if let Some(v) = &patch.description {
            p.description = v.clone();
        }
        if let Some(v) = &patch.repository_url {
            p.repository_url = v.clone();
        }
        Ok(1)
    }

    async fn find_project(
        &self,
        camper_id: UserId,
        project_id: ProjectId,
    ) -> ModelResult<Option<ProjectSummary>> {
        let t = self.read()?;
        Ok(t.projects
            .get(&project_id)
            .filter(|p| p.camper_id == camper_id)
            .cloned())
    }
}
