use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use sponsorship_infra::ModelError;

pub fn model_error_to_response(err: ModelError) -> axum::response::Response {
    match err {
        ModelError::Permission(e) => json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()),
        ModelError::NotFound(what) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
        }
        ModelError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        ModelError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        ModelError::Query(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "query_error", msg),
        ModelError::Password(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "hashing_error", e.to_string())
        }
        // Driver details stay in the logs.
        ModelError::Database(_) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "database_error",
            "database error",
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
