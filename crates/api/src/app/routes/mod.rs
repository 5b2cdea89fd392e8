use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};

use crate::middleware::{auth_middleware, AuthState};

pub mod projects;
pub mod sponsors;
pub mod system;

/// Router for every endpoint except `/health`.
///
/// Reads are public; each mutating method carries the auth gate as a route
/// layer, so it only runs for the methods that need it.
pub fn router(auth: AuthState) -> Router {
    Router::new()
        .route(
            "/whoami",
            get(system::whoami).route_layer(from_fn_with_state(auth.clone(), auth_middleware)),
        )
        .nest("/sponsors", sponsors::router(auth.clone()))
        .nest("/projects", projects::router(auth))
}
