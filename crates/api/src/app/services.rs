//! Infrastructure wiring: pick the stores and hand them to the models.

use std::sync::Arc;

use sponsorship_auth::PasswordHasher;
use sponsorship_infra::{
    db,
    projects::{InMemoryProjectStore, PostgresProjectStore, ProjectModel, ProjectStore},
    sponsors::{InMemorySponsorStore, PostgresSponsorStore, SponsorModel, SponsorStore},
    AppConfig,
};

/// Everything a handler needs, shared behind an `Arc` extension.
#[derive(Clone)]
pub struct AppServices {
    pub sponsors: SponsorModel,
    pub projects: ProjectModel,
}

impl AppServices {
    pub fn new(
        sponsor_store: Arc<dyn SponsorStore>,
        project_store: Arc<dyn ProjectStore>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            sponsors: SponsorModel::new(sponsor_store, hasher),
            projects: ProjectModel::new(project_store),
        }
    }

    /// In-memory stores seeded with the default reference data (dev/test).
    pub fn in_memory(hasher: PasswordHasher) -> Self {
        Self::new(
            Arc::new(InMemorySponsorStore::with_default_reference_data()),
            Arc::new(InMemoryProjectStore::with_default_technologies()),
            hasher,
        )
    }
}

/// Postgres when `DATABASE_URL` is set, in-memory otherwise.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let hasher = PasswordHasher::new(config.bcrypt_cost);

    match db::connect_from_config(config).await? {
        Some(pool) => {
            db::apply_schema(&pool).await?;
            Ok(AppServices::new(
                Arc::new(PostgresSponsorStore::new(pool.clone())),
                Arc::new(PostgresProjectStore::new(pool)),
                hasher,
            ))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores (data is lost on restart)");
            Ok(AppServices::in_memory(hasher))
        }
    }
}
