//! Store interfaces and `SurrealDB` implementation.
//!
//! The store layer handles persistence of candidates and user accounts.

pub mod surreal;

pub use surreal::{StoreError, StoreResult, SurrealTalentStore};
