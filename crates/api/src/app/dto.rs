//! Request parsing helpers shared by the route modules.
//!
//! Every rejection is rendered through [`errors::json_error`] so clients
//! always get the `{"error", "message"}` shape.

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;

use sponsorship_core::{DomainError, ProjectId, UserId};

use crate::app::errors;

fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse()
        .map_err(|e: DomainError| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}

pub fn parse_user_id(raw: &str) -> Result<UserId, axum::response::Response> {
    parse_id(raw)
}

pub fn parse_project_id(raw: &str) -> Result<ProjectId, axum::response::Response> {
    parse_id(raw)
}

/// Unwrap a JSON body, turning axum's plain-text rejection into a JSON error
/// that keeps the rejection's status (400, 415 or 422).
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, axum::response::Response> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(errors::json_error(
            rejection.status(),
            "invalid_body",
            rejection.body_text(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_and_non_positive_ids_are_bad_requests() {
        assert_eq!(parse_user_id("7").ok(), Some(UserId::from_raw(7)));
        for raw in ["abc", "0", "-3"] {
            let res = parse_user_id(raw).unwrap_err();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }
        assert!(parse_project_id("12").is_ok());
    }
}
