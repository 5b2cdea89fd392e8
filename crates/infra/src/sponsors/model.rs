//! Sponsor operations as seen by the HTTP layer.
//!
//! Each operation makes one or two store round trips, logs failures where
//! they happen and hands them back unchanged.

use std::sync::Arc;

use sponsorship_auth::{authorize_owner_or_admin, PasswordHasher, Principal};
use sponsorship_core::UserId;

use super::store::SponsorStore;
use super::types::{
    CreatedSponsor, DeletedSponsor, DonationFinalization, FinalizedSponsor, NewSponsor,
    SponsorDetail, SponsorSummary, UpdatedUser, UserPatch,
};
use crate::{ModelError, ModelResult};

#[derive(Clone)]
pub struct SponsorModel {
    store: Arc<dyn SponsorStore>,
    hasher: PasswordHasher,
}

impl SponsorModel {
    pub fn new(store: Arc<dyn SponsorStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub async fn list_sponsors(&self) -> ModelResult<Vec<SponsorSummary>> {
        self.store
            .list_sponsors()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "list_sponsors failed"))
    }

    /// `Ok(None)` when no sponsor has this id; absence is not an error.
    pub async fn get_sponsor_by_id(&self, id: UserId) -> ModelResult<Option<SponsorDetail>> {
        self.store
            .find_sponsor(id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %id, "get_sponsor_by_id failed"))
    }

    /// Insert a sponsor. `data.password` is persisted as received.
    pub async fn create_sponsor(&self, data: NewSponsor) -> ModelResult<CreatedSponsor> {
        let id = self
            .store
            .insert_sponsor(&data)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "create_sponsor failed"))?;

        tracing::info!(%id, "sponsor created");
        Ok(CreatedSponsor::from_new(id, data))
    }

    /// Patch any user row on behalf of `requester` (the owner or an admin).
    ///
    /// Only fields present in `patch` are written; a new password is hashed
    /// first. Returns the re-read row.
    pub async fn update_user(
        &self,
        id: UserId,
        mut patch: UserPatch,
        requester: &Principal,
    ) -> ModelResult<UpdatedUser> {
        authorize_owner_or_admin(requester, id, "update")
            .inspect_err(|e| tracing::warn!(error = %e, "update_user rejected"))?;

        if patch.is_empty() {
            return Err(ModelError::validation("no fields to update"));
        }

        if let Some(plain) = patch.password.take() {
            let hashed = self
                .hasher
                .hash(&plain)
                .await
                .inspect_err(|e| tracing::error!(error = %e, %id, "update_user hashing failed"))?;
            patch.password = Some(hashed);
        }

        let affected = self
            .store
            .patch_user(id, &patch)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %id, "update_user failed"))?;
        if affected == 0 {
            tracing::warn!(%id, "update_user matched no rows");
            return Err(ModelError::NotFound("user"));
        }

        let data = self
            .store
            .find_profile(id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %id, "update_user re-read failed"))?
            .ok_or(ModelError::NotFound("user"))?;

        tracing::info!(%id, by = %requester.user_id, "user updated");
        Ok(UpdatedUser {
            message: "user updated successfully".to_string(),
            data,
        })
    }

    /// Hard delete, scoped to sponsor rows.
    pub async fn delete_sponsor(&self, id: UserId) -> ModelResult<DeletedSponsor> {
        let affected = self
            .store
            .delete_sponsor(id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %id, "delete_sponsor failed"))?;
        if affected == 0 {
            tracing::warn!(%id, "delete_sponsor matched no rows");
            return Err(ModelError::NotFound("sponsor"));
        }

        tracing::info!(%id, "sponsor deleted");
        Ok(DeletedSponsor {
            message: "sponsor deleted successfully".to_string(),
        })
    }

    /// Register a donor whose initial password is their document number.
    ///
    /// This path writes a different column set than [`Self::create_sponsor`]
    /// and the two are not interchangeable.
    pub async fn finalize_donation_and_generate_password(
        &self,
        data: DonationFinalization,
    ) -> ModelResult<FinalizedSponsor> {
        let hashed = self
            .hasher
            .hash(&data.document_number)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "finalize_donation hashing failed"))?;

        let id = self
            .store
            .insert_donor(&data, &hashed)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "finalize_donation failed"))?;

        tracing::info!(%id, "donation finalized, sponsor account created");
        Ok(FinalizedSponsor { id, donation: data })
    }
}
