use axum::{routing::get, Router};

pub mod sales;
pub mod system;

/// Router for the sale action endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/sales", sales::router())
}
