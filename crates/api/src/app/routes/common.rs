use std::str::FromStr;

use axum::http::StatusCode;
use axum::response::Response;

use crate::app::errors;
use crate::context::AuthContext;

/// Gate for manager-only endpoints.
pub fn require_elevated(ctx: &AuthContext) -> Result<(), Response> {
    if ctx.role().is_elevated() {
        Ok(())
    } else {
        Err(errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Accès réservé aux gestionnaires",
        ))
    }
}

pub fn parse_id<T: FromStr>(raw: &str, what: &'static str) -> Result<T, Response> {
    raw.parse().map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_id",
            format!("invalid {what} id"),
        )
    })
}
