//! Camper project data access: projects owned by a camper and the
//! technologies attached to each project.

pub mod in_memory;
pub mod model;
pub mod postgres;
pub mod store;
pub mod types;

pub use in_memory::InMemoryProjectStore;
pub use model::ProjectModel;
pub use postgres::PostgresProjectStore;
pub use store::ProjectStore;
pub use types::{NewProject, ProjectPatch, ProjectSummary, Technology};
