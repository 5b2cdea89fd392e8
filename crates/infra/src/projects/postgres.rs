//! Postgres-backed project store.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use sponsorship_core::{ProjectId, TechnologyId, UserId};

use super::store::ProjectStore;
use super::types::{NewProject, ProjectPatch, ProjectSummary, Technology};
use crate::error::decode_error;
use crate::{ModelError, ModelResult};

pub struct PostgresProjectStore {
    pool: PgPool,
}

impl PostgresProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn project_from_row(row: &PgRow) -> Result<ProjectSummary, sqlx::Error> {
    Ok(ProjectSummary {
        project_id: ProjectId::from_raw(row.try_get("id")?),
        camper_id: UserId::from_raw(row.try_get("camper_id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        repository_url: row.try_get("repository_url")?,
    })
}

fn technology_from_row(row: &PgRow) -> Result<Technology, sqlx::Error> {
    Ok(Technology {
        technology_id: TechnologyId::from_raw(row.try_get("id")?),
        name: row.try_get("name")?,
    })
}

fn build_project_update(
    camper_id: UserId,
    project_id: ProjectId,
    patch: &ProjectPatch,
) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut qb = QueryBuilder::<Postgres>::new("UPDATE PROJECT SET ");
    {
        let mut set = qb.separated(", ");
        if let Some(v) = &patch.name {
            set.push("name = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &patch.description {
            set.push("description = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &patch.repository_url {
            set.push("repository_url = ").push_bind_unseparated(v.clone());
        }
    }
    qb.push(" WHERE id = ")
        .push_bind(project_id.get())
        .push(" AND camper_id = ")
        .push_bind(camper_id.get());
    Some(qb)
}

#[async_trait]
impl ProjectStore for PostgresProjectStore {
    async fn projects_by_camper(&self, camper_id: UserId) -> ModelResult<Vec<ProjectSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, camper_id, name, description, repository_url
            FROM PROJECT
            WHERE camper_id = $1
            ORDER BY id
            "#,
        )
        .bind(camper_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| project_from_row(row).map_err(decode_error("project row")))
            .collect()
    }

    async fn technologies_for_project(&self, project_id: ProjectId) -> ModelResult<Vec<Technology>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.name
            FROM TECHNOLOGY t
            JOIN PROJECT_TECHNOLOGY pt ON pt.technology_id = t.id
            WHERE pt.project_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(project_id.get())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| technology_from_row(row).map_err(decode_error("technology row")))
            .collect()
    }

    async fn insert_project(&self, project: &NewProject) -> ModelResult<ProjectId> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO PROJECT (camper_id, name, description, repository_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(project.camper_id.get())
        .bind(&project.name)
        .bind(&project.description)
        .bind(&project.repository_url)
        .fetch_one(&mut *tx)
        .await?;
        let id: i64 = row.try_get("id").map_err(decode_error("inserted project id"))?;

        if !project.technology_ids.is_empty() {
            let technology_ids: Vec<i64> = project.technology_ids.iter().map(|t| t.get()).collect();
            sqlx::query(
                r#"
                INSERT INTO PROJECT_TECHNOLOGY (project_id, technology_id)
                SELECT $1, UNNEST($2::BIGINT[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(id)
            .bind(technology_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(ProjectId::from_raw(id))
    }

    async fn patch_project(
        &self,
        camper_id: UserId,
        project_id: ProjectId,
        patch: &ProjectPatch,
    ) -> ModelResult<u64> {
        let Some(mut qb) = build_project_update(camper_id, project_id, patch) else {
            return Err(ModelError::validation("no fields to update"));
        };

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn find_project(
        &self,
        camper_id: UserId,
        project_id: ProjectId,
    ) -> ModelResult<Option<ProjectSummary>> {
        let row = sqlx::query(
            r#"
            SELECT id, camper_id, name, description, repository_url
            FROM PROJECT
            WHERE id = $1 AND camper_id = $2
            "#,
        )
        .bind(project_id.get())
        .bind(camper_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(|r| project_from_row(r).map_err(decode_error("project row")))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_is_scoped_to_camper_and_project() {
        let patch = ProjectPatch {
            name: Some("Renamed".into()),
            repository_url: Some(None),
            ..ProjectPatch::default()
        };

        let qb = build_project_update(UserId::from_raw(3), ProjectId::from_raw(8), &patch).unwrap();
        assert_eq!(
            qb.sql(),
            "UPDATE PROJECT SET name = $1, repository_url = $2 WHERE id = $3 AND camper_id = $4"
        );
    }

    #[test]
    fn empty_patch_builds_nothing() {
        let qb = build_project_update(UserId::from_raw(1), ProjectId::from_raw(1), &ProjectPatch::default());
        assert!(qb.is_none());
    }
}
