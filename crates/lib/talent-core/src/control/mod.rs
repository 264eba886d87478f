use std::{error::Error, fmt};

use surrealdb::{Connection, Surreal};

use crate::auth::AuthError;
use crate::store::{StoreError, SurrealTalentStore};

pub mod candidates;
pub mod report;
pub mod users;

#[derive(Debug)]
pub enum ControlError {
    Store(StoreError),
    Auth(AuthError),
    Report(String),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Auth(err) => write!(f, "{err}"),
            Self::Report(message) => write!(f, "report generation failed: {message}"),
        }
    }
}

impl Error for ControlError {}

impl From<StoreError> for ControlError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<AuthError> for ControlError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

pub(crate) fn invalid_input(message: impl Into<String>) -> ControlError {
    ControlError::Store(StoreError::InvalidInput(message.into()))
}

/// Use-case layer shared by the HTTP handlers.
pub struct TalentControlPlane<C: Connection> {
    store: SurrealTalentStore<C>,
}

impl<C: Connection> Clone for TalentControlPlane<C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<C: Connection> TalentControlPlane<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            store: SurrealTalentStore::new(db),
        }
    }
}
