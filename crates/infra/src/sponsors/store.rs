use async_trait::async_trait;

use sponsorship_core::UserId;

use super::types::{DonationFinalization, NewSponsor, SponsorDetail, SponsorSummary, UserPatch, UserProfile};
use crate::ModelResult;

/// Statement-level access to the `USER` table for sponsor operations.
///
/// Every sponsor-scoped method must constrain `role = 'sponsor'` itself;
/// callers never pass the role in.
#[async_trait]
pub trait SponsorStore: Send + Sync {
    /// All sponsors, ordered by id.
    async fn list_sponsors(&self) -> ModelResult<Vec<SponsorSummary>>;

    async fn find_sponsor(&self, id: UserId) -> ModelResult<Option<SponsorDetail>>;

    /// Insert with `role = 'sponsor'` and `image_url = NULL`. Returns the new id.
    async fn insert_sponsor(&self, sponsor: &NewSponsor) -> ModelResult<UserId>;

    /// Apply the present fields of `patch` to any `USER` row. Returns rows affected.
    ///
    /// `patch.password`, when present, is already hashed.
    async fn patch_user(&self, id: UserId, patch: &UserPatch) -> ModelResult<u64>;

    async fn find_profile(&self, id: UserId) -> ModelResult<Option<UserProfile>>;

    /// Role-scoped hard delete. Returns rows affected.
    async fn delete_sponsor(&self, id: UserId) -> ModelResult<u64>;

    /// Donation-flow insert: labels instead of ids, role left to the column default.
    async fn insert_donor(
        &self,
        donation: &DonationFinalization,
        password_hash: &str,
    ) -> ModelResult<UserId>;
}
