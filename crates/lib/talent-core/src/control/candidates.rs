use surrealdb::Connection;
use talent_store::models::{Candidate, CandidateRequest};
use tracing::{debug, info};
use uuid::Uuid;

use crate::query;

use super::{ControlError, TalentControlPlane, invalid_input};

impl<C: Connection> TalentControlPlane<C> {
    /// Validates and stores a new candidate under a fresh uuid.
    ///
    /// # Errors
    /// Returns `ControlError` if the payload is invalid or the store write fails.
    pub async fn create_candidate(
        &self,
        request: CandidateRequest,
    ) -> Result<Candidate, ControlError> {
        validate_candidate(&request)?;
        let candidate = Candidate::from_request(Uuid::new_v4().to_string(), request);
        let stored = self.store.create_candidate(candidate).await?;
        info!(uuid = %stored.uuid, "candidate created");
        Ok(stored)
    }

    /// Fetches a candidate by id.
    ///
    /// # Errors
    /// Returns `ControlError` if the id is not a uuid or the store query fails.
    pub async fn get_candidate(&self, id: &str) -> Result<Option<Candidate>, ControlError> {
        let uuid = parse_candidate_id(id)?;
        Ok(self.store.get_candidate(&uuid).await?)
    }

    /// Replaces the candidate stored under `id`. Returns `None` if it does not exist.
    ///
    /// # Errors
    /// Returns `ControlError` if the id or payload is invalid or the store write fails.
    pub async fn update_candidate(
        &self,
        id: &str,
        request: CandidateRequest,
    ) -> Result<Option<Candidate>, ControlError> {
        let uuid = parse_candidate_id(id)?;
        validate_candidate(&request)?;
        let updated = self
            .store
            .update_candidate(Candidate::from_request(uuid, request))
            .await?;
        if let Some(candidate) = updated.as_ref() {
            info!(uuid = %candidate.uuid, "candidate updated");
        }
        Ok(updated)
    }

    /// Deletes the candidate stored under `id`. Returns `None` if it does not exist.
    ///
    /// # Errors
    /// Returns `ControlError` if the id is invalid or the store write fails.
    pub async fn delete_candidate(&self, id: &str) -> Result<Option<Candidate>, ControlError> {
        let uuid = parse_candidate_id(id)?;
        let deleted = self.store.delete_candidate(&uuid).await?;
        if deleted.is_some() {
            info!(%uuid, "candidate deleted");
        }
        Ok(deleted)
    }

    /// Lists candidates, optionally narrowed by a free-text search term.
    ///
    /// # Errors
    /// Returns `ControlError` if the store query fails.
    pub async fn search_candidates(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<Candidate>, ControlError> {
        let predicate = query::build(search);
        debug!(conditions = predicate.conditions().len(), "candidate search");
        Ok(self.store.find_candidates(&predicate).await?)
    }
}

fn parse_candidate_id(id: &str) -> Result<String, ControlError> {
    Uuid::parse_str(id.trim())
        .map(|uuid| uuid.to_string())
        .map_err(|_| invalid_input(format!("invalid candidate id: {id}")))
}

fn validate_candidate(request: &CandidateRequest) -> Result<(), ControlError> {
    if request.first_name.trim().is_empty() {
        return Err(invalid_input("first_name is required"));
    }
    if request.last_name.trim().is_empty() {
        return Err(invalid_input("last_name is required"));
    }
    if !request.email.contains('@') {
        return Err(invalid_input("email must contain '@'"));
    }
    if request.salary < 0 {
        return Err(invalid_input("salary must not be negative"));
    }
    if request.years_of_experience < 0 {
        return Err(invalid_input("years_of_experience must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CandidateRequest {
        CandidateRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            career_level: String::new(),
            job_major: String::new(),
            degree_type: String::new(),
            years_of_experience: 3,
            skills: Vec::new(),
            nationality: String::new(),
            city: String::new(),
            salary: 1000,
            gender: String::new(),
        }
    }

    #[test]
    fn candidate_id_is_normalized() {
        let id = parse_candidate_id(" 67E55044-10B1-426F-9247-BB680E5FE0C8 ")
            .expect("uuid should parse");
        assert_eq!(id, "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn candidate_id_rejects_non_uuid() {
        assert!(matches!(
            parse_candidate_id("42"),
            Err(ControlError::Store(crate::store::StoreError::InvalidInput(_)))
        ));
    }

    #[test]
    fn validation_rejects_bad_payloads() {
        assert!(validate_candidate(&request()).is_ok());

        let mut missing_name = request();
        missing_name.first_name = "  ".to_string();
        assert!(validate_candidate(&missing_name).is_err());

        let mut bad_email = request();
        bad_email.email = "ada.example.com".to_string();
        assert!(validate_candidate(&bad_email).is_err());

        let mut negative_salary = request();
        negative_salary.salary = -1;
        assert!(validate_candidate(&negative_salary).is_err());
    }
}
