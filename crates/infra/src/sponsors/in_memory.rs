//! In-memory sponsor store for tests/dev.
//!
//! Mirrors the Postgres schema closely enough that the model behaves the
//! same: a shared user table with a role column, reference tables resolved
//! by id or by label, unique emails and foreign-key checks.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDate;

use sponsorship_auth::Role;
use sponsorship_core::{CityId, DocumentTypeId, UserId};

use super::store::SponsorStore;
use super::types::{DonationFinalization, NewSponsor, SponsorDetail, SponsorSummary, UserPatch, UserProfile};
use crate::{ModelError, ModelResult};

/// Reference labels seeded by the bootstrap schema.
pub const DEFAULT_DOCUMENT_TYPES: &[&str] = &["Cédula de ciudadanía", "Cédula de extranjería", "Pasaporte"];
pub const DEFAULT_CITIES: &[&str] = &["Bucaramanga", "Bogotá", "Medellín"];

/// A full `USER` row, password included. Only test and dev code sees this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub document_type_id: Option<DocumentTypeId>,
    pub document_number: String,
    pub city_id: Option<CityId>,
    pub birth_date: NaiveDate,
    pub role: Role,
    pub image_url: Option<String>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, UserRecord>,
    document_types: BTreeMap<DocumentTypeId, String>,
    cities: BTreeMap<CityId, String>,
    last_user_id: i64,
}

impl Tables {
    fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId::from_raw(self.last_user_id)
    }

    fn ensure_unique_email(&self, email: &str, except: Option<UserId>) -> ModelResult<()> {
        let taken = self
            .users
            .values()
            .any(|u| u.email == email && Some(u.id) != except);
        if taken {
            return Err(ModelError::conflict(format!("email '{email}' is already registered")));
        }
        Ok(())
    }

    fn ensure_references(
        &self,
        document_type_id: Option<DocumentTypeId>,
        city_id: Option<CityId>,
    ) -> ModelResult<()> {
        if let Some(id) = document_type_id {
            if !self.document_types.contains_key(&id) {
                return Err(ModelError::validation(format!("unknown document type {id}")));
            }
        }
        if let Some(id) = city_id {
            if !self.cities.contains_key(&id) {
                return Err(ModelError::validation(format!("unknown city {id}")));
            }
        }
        Ok(())
    }

    fn summary(&self, u: &UserRecord) -> SponsorSummary {
        SponsorSummary {
            user_id: u.id,
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            email: u.email.clone(),
            document_type: u.document_type_id.and_then(|id| self.document_types.get(&id).cloned()),
            document_number: u.document_number.clone(),
            city: u.city_id.and_then(|id| self.cities.get(&id).cloned()),
            birth_date: u.birth_date,
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemorySponsorStore {
    inner: RwLock<Tables>,
}

impl InMemorySponsorStore {
    /// Empty store with no reference data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the same reference labels as the bootstrap schema.
    pub fn with_default_reference_data() -> Self {
        Self::with_reference_data(DEFAULT_DOCUMENT_TYPES, DEFAULT_CITIES)
    }

    /// Reference rows get ids `1..` in the given order.
    pub fn with_reference_data(document_types: &[&str], cities: &[&str]) -> Self {
        let tables = Tables {
            document_types: (1..)
                .zip(document_types)
                .map(|(id, name)| (DocumentTypeId::from_raw(id), name.to_string()))
                .collect(),
            cities: (1..)
                .zip(cities)
                .map(|(id, name)| (CityId::from_raw(id), name.to_string()))
                .collect(),
            ..Tables::default()
        };
        Self {
            inner: RwLock::new(tables),
        }
    }

    /// Insert an arbitrary row (any role). The id of `record` is replaced.
    pub fn insert_record(&self, mut record: UserRecord) -> ModelResult<UserId> {
        let mut t = self.write()?;
        t.ensure_unique_email(&record.email, None)?;
        t.ensure_references(record.document_type_id, record.city_id)?;
        let id = t.next_user_id();
        record.id = id;
        t.users.insert(id, record);
        Ok(id)
    }

    /// Raw row lookup, regardless of role.
    pub fn record(&self, id: UserId) -> Option<UserRecord> {
        self.inner.read().ok()?.users.get(&id).cloned()
    }

    fn read(&self) -> ModelResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| ModelError::query("in-memory user table lock poisoned"))
    }

    fn write(&self) -> ModelResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| ModelError::query("in-memory user table lock poisoned"))
    }
}

#[async_trait]
impl SponsorStore for InMemorySponsorStore {
    async fn list_sponsors(&self) -> ModelResult<Vec<SponsorSummary>> {
        let t = self.read()?;
        Ok(t.users
            .values()
            .filter(|u| u.role == Role::Sponsor)
            .map(|u| t.summary(u))
            .collect())
    }

    async fn find_sponsor(&self, id: UserId) -> ModelResult<Option<SponsorDetail>> {
        let t = self.read()?;
        Ok(t.users
            .get(&id)
            .filter(|u| u.role == Role::Sponsor)
            .map(|u| SponsorDetail {
                summary: t.summary(u),
                role: u.role,
            }))
    }

    async fn insert_sponsor(&self, sponsor: &NewSponsor) -> ModelResult<UserId> {
        self.insert_record(UserRecord {
            id: UserId::from_raw(0),
            first_name: sponsor.first_name.clone(),
            last_name: sponsor.last_name.clone(),
            email: sponsor.email.clone(),
            password: sponsor.password.clone(),
            document_type_id: Some(sponsor.document_type_id),
            document_number: sponsor.document_number.clone(),
            city_id: Some(sponsor.city_id),
            birth_date: sponsor.birth_date,
            role: Role::Sponsor,
            image_url: None,
        })
    }

    async fn patch_user(&self, id: UserId, patch: &UserPatch) -> ModelResult<u64> {
        if patch.is_empty() {
            return Err(ModelError::validation("no fields to update"));
        }

        let mut t = self.write()?;
        if !t.users.contains_key(&id) {
            return Ok(0);
        }
        if let Some(email) = &patch.email {
            t.ensure_unique_email(email, Some(id))?;
        }
        t.ensure_references(patch.document_type_id, patch.city_id)?;

        let Some(u) = t.users.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(v) = &patch.first_name {
            u.first_name = v.clone();
        }
        if let Some(v) = &patch.last_name {
            u.last_name = v.clone();
        }
        if let Some(v) = &patch.email {
            u.email = v.clone();
        }
        if let Some(v) = &patch.password {
            u.password = v.clone();
        }
        if let Some(v) = &patch.image_url {
            u.image_url = v.clone();
        }
        if let Some(v) = patch.document_type_id {
            u.document_type_id = Some(v);
        }
        if let Some(v) = &patch.document_number {
            u.document_number = v.clone();
        }
        if let Some(v) = patch.city_id {
            u.city_id = Some(v);
        }
        if let Some(v) = patch.birth_date {
            u.birth_date = v;
        }
        Ok(1)
    }

    async fn find_profile(&self, id: UserId) -> ModelResult<Option<UserProfile>> {
        let t = self.read()?;
        Ok(t.users.get(&id).map(|u| UserProfile {
            id: u.id,
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            email: u.email.clone(),
            image_url: u.image_url.clone(),
            document_type_id: u.document_type_id,
            document_number: u.document_number.clone(),
            city_id: u.city_id,
            birth_date: u.birth_date,
        }))
    }

    async fn delete_sponsor(&self, id: UserId) -> ModelResult<u64> {
        let mut t = self.write()?;
        match t.users.get(&id) {
            Some(u) if u.role == Role::Sponsor => {
                t.users.remove(&id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn insert_donor(
        &self,
        donation: &DonationFinalization,
        password_hash: &str,
    ) -> ModelResult<UserId> {
        let (document_type_id, city_id) = {
            let t = self.read()?;
            let document_type_id = t
                .document_types
                .iter()
                .find(|(_, name)| **name == donation.document_type)
                .map(|(id, _)| *id);
            let city_id = t
                .cities
                .iter()
                .find(|(_, name)| **name == donation.city)
                .map(|(id, _)| *id);
            (document_type_id, city_id)
        };

        self.insert_record(UserRecord {
            id: UserId::from_raw(0),
            first_name: donation.first_name.clone(),
            last_name: donation.last_name.clone(),
            email: donation.email.clone(),
            password: password_hash.to_string(),
            document_type_id,
            document_number: donation.document_number.clone(),
            city_id,
            birth_date: donation.birth_date,
            // Column default.
            role: Role::Sponsor,
            image_url: None,
        })
    }
}
