use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use sale_revoke_sales::SaleId;

use crate::app::dto::{IdsRequest, RevokeResponse, SaleSummary};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_sales))
        .route("/revoke", post(revoke_sales))
        .route("/create-pending-moves", post(create_pending_moves))
        .route("/:id", get(get_sale))
}

pub async fn list_sales(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let sales = match services.sales() {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let variant = services.variant();
    let body: Vec<SaleSummary> = sales.iter().map(|s| SaleSummary::from_sale(s, variant)).collect();
    (StatusCode::OK, Json(body)).into_response()
}

pub async fn get_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SaleId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    match services.sale(id) {
        Ok(sale) => (StatusCode::OK, Json(SaleSummary::from_sale(&sale, services.variant()))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn revoke_sales(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<IdsRequest>,
) -> axum::response::Response {
    let ids = match body.parse() {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };
    match services.revoke(&ids) {
        Ok(revoked) => {
            tracing::info!(requested = ids.len(), revoked = revoked.len(), "revoke request handled");
            (StatusCode::OK, Json(RevokeResponse { revoked })).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "revoke rejected");
            errors::sale_error_to_response(e)
        }
    }
}

pub async fn create_pending_moves(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<IdsRequest>,
) -> axum::response::Response {
    let ids = match body.parse() {
        Ok(ids) => ids,
        Err(resp) => return resp,
    };
    match services.create_pending_moves(&ids) {
        Ok(action) => (StatusCode::OK, Json(action)).into_response(),
        Err(e) => errors::sale_error_to_response(e),
    }
}
