use serde::{Deserialize, Serialize};

use sponsorship_core::{patch::double_option, ProjectId, TechnologyId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: ProjectId,
    pub camper_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub repository_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub technology_id: TechnologyId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProject {
    pub camper_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub repository_url: Option<String>,
    #[serde(default)]
    pub technology_ids: Vec<TechnologyId>,
}

/// Partial update of a project row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub repository_url: Option<Option<String>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.repository_url.is_none()
    }
}
