//! Core types and services for talent-directory.
//!
//! This crate builds candidate search filters, owns the `SurrealDB` backing
//! store, issues and verifies access tokens, and exposes the control plane
//! the HTTP layer calls into.

pub mod auth;
pub mod control;
pub mod query;
pub mod store;
