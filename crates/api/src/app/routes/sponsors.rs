use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use sponsorship_infra::sponsors::{DonationFinalization, NewSponsor, UserPatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;
use crate::middleware::{auth_middleware, AuthState};

pub fn router(auth: AuthState) -> Router {
    Router::new()
        .route(
            "/",
            get(list_sponsors).merge(
                post(create_sponsor)
                    .route_layer(from_fn_with_state(auth.clone(), auth_middleware)),
            ),
        )
        // The donor has no account yet, so this one stays public.
        .route("/finalize-donation", post(finalize_donation))
        .route(
            "/:id",
            get(get_sponsor).merge(
                put(update_user)
                    .merge(delete(delete_sponsor))
                    .route_layer(from_fn_with_state(auth.clone(), auth_middleware)),
            ),
        )
}

pub async fn list_sponsors(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.sponsors.list_sponsors().await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::model_error_to_response(e),
    }
}

pub async fn get_sponsor(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_user_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.sponsors.get_sponsor_by_id(id).await {
        Ok(Some(sponsor)) => (StatusCode::OK, Json(sponsor)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "sponsor not found"),
        Err(e) => errors::model_error_to_response(e),
    }
}

pub async fn create_sponsor(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<NewSponsor>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(v) => v,
        Err(res) => return res,
    };
    tracing::debug!(requester = %principal.user_id(), "create sponsor");
    match services.sponsors.create_sponsor(body).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::model_error_to_response(e),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let id = match dto::parse_user_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services
        .sponsors
        .update_user(id, body, principal.principal())
        .await
    {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(e) => errors::model_error_to_response(e),
    }
}

pub async fn delete_sponsor(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_user_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    tracing::debug!(requester = %principal.user_id(), sponsor = %id, "delete sponsor");
    match services.sponsors.delete_sponsor(id).await {
        Ok(deleted) => (StatusCode::OK, Json(deleted)).into_response(),
        Err(e) => errors::model_error_to_response(e),
    }
}

pub async fn finalize_donation(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<DonationFinalization>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services
        .sponsors
        .finalize_donation_and_generate_password(body)
        .await
    {
        Ok(finalized) => (StatusCode::CREATED, Json(finalized)).into_response(),
        Err(e) => errors::model_error_to_response(e),
    }
}
