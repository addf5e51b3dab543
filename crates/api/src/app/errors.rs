use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use sale_revoke_core::DomainError;
use sale_revoke_sales::SaleError;

pub fn sale_error_to_response(err: SaleError) -> axum::response::Response {
    match err {
        e @ SaleError::CannotRevoke { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "cannot_revoke", e.to_string())
        }
        SaleError::Domain(e) => domain_error_to_response(e),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match &err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Validation(_) | DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
        DomainError::InvariantViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
    };
    json_error(status, err.code(), err.to_string())
}

/// `{"error": code, "message": ...}` with the given status.
pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> axum::response::Response {
    (status, axum::Json(json!({ "error": code, "message": message.into() }))).into_response()
}
