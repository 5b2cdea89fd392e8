//! Sponsor data access.
//!
//! A sponsor is a row of the shared `USER` table whose `role` is `sponsor`.
//! [`SponsorModel`] is the entry point; [`SponsorStore`] implementations own
//! the statements.

pub mod in_memory;
pub mod model;
pub mod postgres;
pub mod store;
pub mod types;

pub use in_memory::{InMemorySponsorStore, UserRecord};
pub use model::SponsorModel;
pub use postgres::PostgresSponsorStore;
pub use store::SponsorStore;
pub use types::{
    CreatedSponsor, DeletedSponsor, DonationFinalization, FinalizedSponsor, NewSponsor,
    SponsorDetail, SponsorSummary, UpdatedUser, UserPatch, UserProfile,
};
