//! `sale-revoke-core` — domain foundation building blocks.
//!
//! Pure domain primitives shared by the products, inventory and sales crates
//! (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use value_object::ValueObject;

#[doc(hidden)]
pub use uuid::Uuid;
