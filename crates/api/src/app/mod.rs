//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection (Postgres or in-memory) and the models
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: path parsing helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use sponsorship_auth::Hs256JwtValidator;
use sponsorship_infra::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(build_router(&config.jwt_secret, Arc::new(services)))
}

/// Router over already-wired services.
pub fn build_router(jwt_secret: &str, services: Arc<services::AppServices>) -> Router {
    let jwt = Arc::new(Hs256JwtValidator::new(jwt_secret));
    let auth_state = middleware::AuthState { jwt };

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(auth_state))
        .layer(Extension(services))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
