use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use sponsorship_infra::projects::{NewProject, ProjectPatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;
use crate::middleware::{auth_middleware, AuthState};

pub fn router(auth: AuthState) -> Router {
    Router::new()
        .route(
            "/",
            post(add_project).route_layer(from_fn_with_state(auth.clone(), auth_middleware)),
        )
        .route("/technologies/:project_id", get(project_technologies))
        .route("/:camper_id", get(projects_by_camper))
        .route(
            "/:camper_id/:project_id",
            put(update_project).route_layer(from_fn_with_state(auth, auth_middleware)),
        )
}

pub async fn projects_by_camper(
    Extension(services): Extension<Arc<AppServices>>,
    Path(camper_id): Path<String>,
) -> axum::response::Response {
    let camper_id = match dto::parse_user_id(&camper_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.projects.projects_by_camper(camper_id).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::model_error_to_response(e),
    }
}

pub async fn project_technologies(
    Extension(services): Extension<Arc<AppServices>>,
    Path(project_id): Path<String>,
) -> axum::response::Response {
    let project_id = match dto::parse_project_id(&project_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services.projects.project_technologies(project_id).await {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::model_error_to_response(e),
    }
}

pub async fn add_project(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<NewProject>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services
        .projects
        .add_project_for_camper(body, principal.principal())
        .await
    {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(e) => errors::model_error_to_response(e),
    }
}

pub async fn update_project(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path((camper_id, project_id)): Path<(String, String)>,
    body: Result<Json<ProjectPatch>, JsonRejection>,
) -> axum::response::Response {
    let body = match dto::json_body(body) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let camper_id = match dto::parse_user_id(&camper_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let project_id = match dto::parse_project_id(&project_id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    match services
        .projects
        .update_project_for_camper(camper_id, project_id, body, principal.principal())
        .await
    {
        Ok(project) => (StatusCode::OK, Json(project)).into_response(),
        Err(e) => errors::model_error_to_response(e),
    }
}
