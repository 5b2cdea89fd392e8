//! Row shapes and payloads of the sponsor operations.
//!
//! None of the output types carries a password field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sponsorship_auth::Role;
use sponsorship_core::{patch::double_option, CityId, DocumentTypeId, UserId};

/// One entry of the sponsor listing, with reference ids resolved to labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorSummary {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub document_type: Option<String>,
    pub document_number: String,
    pub city: Option<String>,
    pub birth_date: NaiveDate,
}

/// A single sponsor looked up by id. Same columns as the listing plus `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorDetail {
    #[serde(flatten)]
    pub summary: SponsorSummary,
    pub role: Role,
}

/// Input of `create_sponsor`.
///
/// `password` is stored exactly as given: callers hand in the final form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewSponsor {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub document_type_id: DocumentTypeId,
    pub document_number: String,
    pub city_id: CityId,
    pub birth_date: NaiveDate,
}

/// Echo of a created sponsor: the submitted fields, the generated id and the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedSponsor {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub document_type_id: DocumentTypeId,
    pub document_number: String,
    pub city_id: CityId,
    pub birth_date: NaiveDate,
    pub role: Role,
}

impl CreatedSponsor {
    pub(crate) fn from_new(id: UserId, new: NewSponsor) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            document_type_id: new.document_type_id,
            document_number: new.document_number,
            city_id: new.city_id,
            birth_date: new.birth_date,
            role: Role::Sponsor,
        }
    }
}

/// Partial update of a `USER` row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Plaintext on the way in; the model replaces it with a bcrypt hash.
    pub password: Option<String>,
    /// `Some(None)` clears the column; absent leaves it alone.
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    pub document_type_id: Option<DocumentTypeId>,
    pub document_number: Option<String>,
    pub city_id: Option<CityId>,
    pub birth_date: Option<NaiveDate>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.image_url.is_none()
            && self.document_type_id.is_none()
            && self.document_number.is_none()
            && self.city_id.is_none()
            && self.birth_date.is_none()
    }
}

/// A `USER` row as re-read after an update (raw reference ids, no password).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub document_type_id: Option<DocumentTypeId>,
    pub document_number: String,
    pub city_id: Option<CityId>,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedUser {
    pub message: String,
    pub data: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedSponsor {
    pub message: String,
}

/// Input of the donation flow. Document type and city arrive as labels, not ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationFinalization {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub document_type: String,
    pub document_number: String,
    pub city: String,
    pub birth_date: NaiveDate,
}

/// Echo of the donation flow: the submitted fields plus the generated id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizedSponsor {
    pub id: UserId,
    #[serde(flatten)]
    pub donation: DonationFinalization,
}
