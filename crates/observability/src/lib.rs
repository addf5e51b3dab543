//! Tracing/logging setup shared by the binaries.

pub mod tracing;

pub use crate::tracing::{init, init_with, LogFormat};
