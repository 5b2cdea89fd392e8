//! Postgres-backed sponsor store.
//!
//! Statements use positional placeholders only. The role discriminator is
//! always bound from [`Role::Sponsor`], never interpolated from input.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use sponsorship_auth::Role;
use sponsorship_core::{CityId, DocumentTypeId, UserId};

use super::store::SponsorStore;
use super::types::{DonationFinalization, NewSponsor, SponsorDetail, SponsorSummary, UserPatch, UserProfile};
use crate::error::decode_error;
use crate::{ModelError, ModelResult};

const SPONSOR_SELECT: &str = r#"
    SELECT
        s.id AS user_id,
        s.first_name,
        s.last_name,
        s.email,
        dt.name AS document_type,
        s.document_number,
        c.name AS city,
        s.birth_date,
        s.role
    FROM "USER" s
    LEFT JOIN DOCUMENT_TYPE dt ON s.document_type_id = dt.id
    LEFT JOIN CITY c ON s.city_id = c.id
"#;

pub struct PostgresSponsorStore {
    pool: PgPool,
}

impl PostgresSponsorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn summary_from_row(row: &PgRow) -> Result<SponsorSummary, sqlx::Error> {
    Ok(SponsorSummary {
        user_id: UserId::from_raw(row.try_get("user_id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        document_type: row.try_get("document_type")?,
        document_number: row.try_get("document_number")?,
        city: row.try_get("city")?,
        birth_date: row.try_get("birth_date")?,
    })
}

fn detail_from_row(row: &PgRow) -> ModelResult<SponsorDetail> {
    let summary = summary_from_row(row).map_err(decode_error("sponsor row"))?;
    let role: String = row.try_get("role").map_err(decode_error("sponsor role"))?;
    let role = role
        .parse::<Role>()
        .map_err(|e| ModelError::query(format!("sponsor role: {e}")))?;
    Ok(SponsorDetail { summary, role })
}

fn profile_from_row(row: &PgRow) -> Result<UserProfile, sqlx::Error> {
    Ok(UserProfile {
        id: UserId::from_raw(row.try_get("id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        image_url: row.try_get("image_url")?,
        document_type_id: row
            .try_get::<Option<i64>, _>("document_type_id")?
            .map(DocumentTypeId::from_raw),
        document_number: row.try_get("document_number")?,
        city_id: row.try_get::<Option<i64>, _>("city_id")?.map(CityId::from_raw),
        birth_date: row.try_get("birth_date")?,
    })
}

/// Build `UPDATE "USER" SET ... WHERE id = $n` from the present patch fields.
///
/// Returns `None` when the patch has nothing to set.
fn build_user_update(id: UserId, patch: &UserPatch) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut qb = QueryBuilder::<Postgres>::new(r#"UPDATE "USER" SET "#);
    {
        let mut set = qb.separated(", ");
        if let Some(v) = &patch.first_name {
            set.push("first_name = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &patch.last_name {
            set.push("last_name = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &patch.email {
            set.push("email = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &patch.password {
            set.push("password = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &patch.image_url {
            set.push("image_url = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = patch.document_type_id {
            set.push("document_type_id = ").push_bind_unseparated(v.get());
        }
        if let Some(v) = &patch.document_number {
            set.push("document_number = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = patch.city_id {
            set.push("city_id = ").push_bind_unseparated(v.get());
        }
        if let Some(v) = patch.birth_date {
            set.push("birth_date = ").push_bind_unseparated(v);
        }
    }
    qb.push(" WHERE id = ").push_bind(id.get());
    Some(qb)
}

#[async_trait]
impl SponsorStore for PostgresSponsorStore {
    async fn list_sponsors(&self) -> ModelResult<Vec<SponsorSummary>> {
        let sql = format!("{SPONSOR_SELECT} WHERE s.role = $1 ORDER BY s.id");
        let rows = sqlx::query(&sql)
            .bind(Role::Sponsor.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| summary_from_row(row).map_err(decode_error("sponsor row")))
            .collect()
    }

    async fn find_sponsor(&self, id: UserId) -> ModelResult<Option<SponsorDetail>> {
        let sql = format!("{SPONSOR_SELECT} WHERE s.id = $1 AND s.role = $2");
        let row = sqlx::query(&sql)
            .bind(id.get())
            .bind(Role::Sponsor.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(detail_from_row).transpose()
    }

    async fn insert_sponsor(&self, sponsor: &NewSponsor) -> ModelResult<UserId> {
        let row = sqlx::query(
            r#"
            INSERT INTO "USER" (
                first_name, last_name, email, password,
                document_type_id, document_number, city_id,
                birth_date, role, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NULL)
            RETURNING id
            "#,
        )
        .bind(&sponsor.first_name)
        .bind(&sponsor.last_name)
        .bind(&sponsor.email)
        .bind(&sponsor.password)
        .bind(sponsor.document_type_id.get())
        .bind(&sponsor.document_number)
        .bind(sponsor.city_id.get())
        .bind(sponsor.birth_date)
        .bind(Role::Sponsor.as_str())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id").map_err(decode_error("inserted sponsor id"))?;
        Ok(UserId::from_raw(id))
    }

    async fn patch_user(&self, id: UserId, patch: &UserPatch) -> ModelResult<u64> {
        let Some(mut qb) = build_user_update(id, patch) else {
            return Err(ModelError::validation("no fields to update"));
        };

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn find_profile(&self, id: UserId) -> ModelResult<Option<UserProfile>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, image_url,
                   document_type_id, document_number, city_id, birth_date
            FROM "USER"
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(|r| profile_from_row(r).map_err(decode_error("user profile row")))
            .transpose()
    }

    async fn delete_sponsor(&self, id: UserId) -> ModelResult<u64> {
        let result = sqlx::query(r#"DELETE FROM "USER" WHERE id = $1 AND role = $2"#)
            .bind(id.get())
            .bind(Role::Sponsor.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_donor(
        &self,
        donation: &DonationFinalization,
        password_hash: &str,
    ) -> ModelResult<UserId> {
        let row = sqlx::query(
            r#"
            INSERT INTO "USER" (
                first_name, last_name, email, password,
                document_type_id, document_number, city_id, birth_date
            )
            VALUES (
                $1, $2, $3, $4,
                (SELECT id FROM DOCUMENT_TYPE WHERE name = $5),
                $6,
                (SELECT id FROM CITY WHERE name = $7),
                $8
            )
            RETURNING id
            "#,
        )
        .bind(&donation.first_name)
        .bind(&donation.last_name)
        .bind(&donation.email)
        .bind(password_hash)
        .bind(&donation.document_type)
        .bind(&donation.document_number)
        .bind(&donation.city)
        .bind(donation.birth_date)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id").map_err(decode_error("inserted donor id"))?;
        Ok(UserId::from_raw(id))
    }
}
