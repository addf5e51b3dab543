//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store and sale actions behind one handle
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: request/response shapes
//! - `errors.rs`: error to JSON response mapping

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::{build_services, AppServices};

/// Build the full HTTP router around already wired services.
pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router().layer(ServiceBuilder::new().layer(Extension(services)))
}
