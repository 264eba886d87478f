use serde::{Deserialize, Serialize};

/// Candidate profile as stored in the `candidate` table.
///
/// The record key is the `uuid` value, so lookups never depend on the
/// database-assigned `id` (which is ignored on read).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    pub uuid: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub career_level: String,
    #[serde(default)]
    pub job_major: String,
    #[serde(default)]
    pub degree_type: String,
    #[serde(default)]
    pub years_of_experience: i64,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub salary: i64,
    #[serde(default)]
    pub gender: String,
}

impl Candidate {
    /// Builds a stored candidate from a request payload and its assigned key.
    #[must_use]
    pub fn from_request(uuid: impl Into<String>, request: CandidateRequest) -> Self {
        let CandidateRequest {
            first_name,
            last_name,
            email,
            career_level,
            job_major,
            degree_type,
            years_of_experience,
            skills,
            nationality,
            city,
            salary,
            gender,
        } = request;
        Self {
            uuid: uuid.into(),
            first_name,
            last_name,
            email,
            career_level,
            job_major,
            degree_type,
            years_of_experience,
            skills,
            nationality,
            city,
            salary,
            gender,
        }
    }
}

/// Candidate payload accepted on create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CandidateRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub career_level: String,
    #[serde(default)]
    pub job_major: String,
    #[serde(default)]
    pub degree_type: String,
    #[serde(default)]
    pub years_of_experience: i64,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub salary: i64,
    #[serde(default)]
    pub gender: String,
}

/// Account record stored in the `user` table, keyed by `username`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashed_password: Option<String>,
}

/// Registration payload carrying the plain-text password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// Profile payload used to seed the user table without credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UserProfile {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}
