//! Infrastructure layer: configuration, Postgres access and the data-access
//! models that own every SQL statement the backend issues.

pub mod config;
pub mod db;
pub mod error;
pub mod projects;
pub mod sponsors;

pub use config::AppConfig;
pub use error::{ModelError, ModelResult};
