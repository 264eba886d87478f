//! Storage models and schema constants for talent-directory.
//!
//! This crate defines the record shapes shared by the search builder, the
//! control plane, the report writer, and the HTTP layer.

pub mod models;
pub mod schema;

pub use models::*;
