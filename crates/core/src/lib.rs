//! `sponsorship-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod patch;

pub use error::DomainError;
pub use id::{CityId, DocumentTypeId, ProjectId, TechnologyId, UserId};
