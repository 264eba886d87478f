use std::{error::Error, fmt, sync::Arc};

use surrealdb::{Connection, Surreal};
use talent_store::models::{Candidate, User};
use talent_store::schema::{TABLE_CANDIDATE, TABLE_USER};
use tracing::debug;

use crate::query::FilterPredicate;

#[derive(Debug)]
pub enum StoreError {
    Surreal(Box<surrealdb::Error>),
    InvalidInput(String),
    Conflict(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surreal(err) => write!(f, "SurrealDB error: {err}"),
            Self::InvalidInput(message) => write!(f, "Invalid input: {message}"),
            Self::Conflict(message) => write!(f, "Conflict: {message}"),
        }
    }
}

impl Error for StoreError {}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        Self::Surreal(Box::new(err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Candidate and user persistence over any `SurrealDB` connection.
pub struct SurrealTalentStore<C: Connection> {
    db: Arc<Surreal<C>>,
}

impl<C: Connection> Clone for SurrealTalentStore<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealTalentStore<C> {
    #[must_use]
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            db: Arc::new(db),
        }
    }

    /// Creates a candidate keyed by its uuid.
    ///
    /// # Errors
    /// Returns `StoreError` if validation fails or the database write fails.
    pub async fn create_candidate(&self, candidate: Candidate) -> StoreResult<Candidate> {
        ensure_non_empty(&candidate.uuid, "uuid")?;
        let record: Option<Candidate> = self
            .db
            .create((TABLE_CANDIDATE, candidate.uuid.clone()))
            .content(candidate)
            .await?;
        require_record(record, TABLE_CANDIDATE)
    }

    /// Fetches a candidate by uuid.
    ///
    /// # Errors
    /// Returns `StoreError` if the database query fails.
    pub async fn get_candidate(&self, uuid: &str) -> StoreResult<Option<Candidate>> {
        let record: Option<Candidate> = self.db.select((TABLE_CANDIDATE, uuid)).await?;
        Ok(record)
    }

    /// Replaces an existing candidate. Returns `None` when no record has that uuid.
    ///
    /// # Errors
    /// Returns `StoreError` if validation fails or the database write fails.
    pub async fn update_candidate(&self, candidate: Candidate) -> StoreResult<Option<Candidate>> {
        ensure_non_empty(&candidate.uuid, "uuid")?;
        let record: Option<Candidate> = self
            .db
            .update((TABLE_CANDIDATE, candidate.uuid.clone()))
            .content(candidate)
            .await?;
        Ok(record)
    }

    /// Deletes a candidate and returns the removed record, if any.
    ///
    /// # Errors
    /// Returns `StoreError` if the database write fails.
    pub async fn delete_candidate(&self, uuid: &str) -> StoreResult<Option<Candidate>> {
        let record: Option<Candidate> = self.db.delete((TABLE_CANDIDATE, uuid)).await?;
        Ok(record)
    }

    /// Lists candidates matching a search predicate.
    ///
    /// # Errors
    /// Returns `StoreError` if the database query fails.
    pub async fn find_candidates(
        &self,
        predicate: &FilterPredicate,
    ) -> StoreResult<Vec<Candidate>> {
        let Some(filter) = predicate.to_surql() else {
            let statement = format!("SELECT * FROM {TABLE_CANDIDATE};");
            let mut response = self.db.query(statement).await?;
            let records: Vec<Candidate> = response.take(0)?;
            return Ok(records);
        };
        let statement = format!("SELECT * FROM {TABLE_CANDIDATE} WHERE {};", filter.clause);
        debug!(clause = %filter.clause, "searching candidates");
        let mut query = self.db.query(statement);
        for binding in filter.bindings {
            query = query.bind(binding);
        }
        let mut response = query.await?;
        let records: Vec<Candidate> = response.take(0)?;
        Ok(records)
    }

    /// Fetches a user by username.
    ///
    /// # Errors
    /// Returns `StoreError` if the database query fails.
    pub async fn get_user(&self, username: &str) -> StoreResult<Option<User>> {
        let record: Option<User> = self.db.select((TABLE_USER, username)).await?;
        Ok(record)
    }

    /// Creates a user, refusing to overwrite an existing username.
    ///
    /// The record key is the username, so the database rejects a second
    /// create for the same name even when two writers race.
    ///
    /// # Errors
    /// Returns `StoreError::Conflict` if the username is taken, or a database error.
    pub async fn create_user(&self, user: User) -> StoreResult<User> {
        ensure_non_empty(&user.username, "username")?;
        let username = user.username.clone();
        let created: Result<Option<User>, surrealdb::Error> = self
            .db
            .create((TABLE_USER, username.clone()))
            .content(user)
            .await;
        match created {
            Ok(record) => require_record(record, TABLE_USER),
            Err(err) if is_write_conflict(&err) => {
                debug!(%username, error = %err, "user create lost to an existing record");
                Err(StoreError::Conflict(format!(
                    "username already registered: {username}"
                )))
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Duplicate record keys and optimistic transaction conflicts both mean
/// another writer already claimed the key.
fn is_write_conflict(err: &surrealdb::Error) -> bool {
    let message = err.to_string();
    message.contains("already exists")
        || message.contains("read or write conflict")
        || message.contains("can be retried")
}

fn ensure_non_empty(value: &str, field: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidInput(format!("{field} is required")));
    }
    Ok(())
}

fn require_record<T>(record: Option<T>, table: &str) -> StoreResult<T> {
    record.ok_or_else(|| {
        StoreError::InvalidInput(format!(
            "No record returned when creating {table}"
        ))
    })
}
