//! Password hashing and bearer-token issuance.
//!
//! Passwords are stored as Argon2id PHC strings. Access tokens are
//! `base64url(claims).base64url(hmac_sha256(claims))`, where the claims carry
//! the username and an expiry in unix seconds.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SALT_LEN: usize = 16;
pub const TOKEN_TYPE_BEARER: &str = "bearer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingCredential,
    MalformedToken,
    BadSignature,
    Expired,
    InvalidCredentials,
    Disabled(String),
    InvalidSecret,
    Hashing(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => write!(f, "missing bearer credential"),
            Self::MalformedToken => write!(f, "malformed access token"),
            Self::BadSignature => write!(f, "access token signature mismatch"),
            Self::Expired => write!(f, "access token expired"),
            Self::InvalidCredentials => write!(f, "incorrect username or password"),
            Self::Disabled(username) => write!(f, "user is disabled: {username}"),
            Self::InvalidSecret => write!(f, "token signing secret rejected"),
            Self::Hashing(message) => write!(f, "password hashing failed: {message}"),
        }
    }
}

impl Error for AuthError {}

/// Identity carried by a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
}

/// Token response returned from the login route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Hashes a password with Argon2id and a fresh random salt.
///
/// # Errors
/// Returns `AuthError::Hashing` if the salt or hash cannot be produced.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    let salt = SaltString::encode_b64(&salt).map_err(|err| AuthError::Hashing(err.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AuthError::Hashing(err.to_string()))?;
    Ok(hash.to_string())
}

/// Checks a password against a stored PHC hash string.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Issues and verifies signed access tokens.
#[derive(Clone)]
pub struct TokenAuthority {
    secret: Vec<u8>,
    ttl: Duration,
}

impl fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenAuthority {
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Issues a token for `username` that expires after the configured ttl.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidSecret` if the signing key is rejected.
    pub fn issue(&self, username: &str) -> Result<AccessToken, AuthError> {
        self.issue_at(username, Utc::now().timestamp())
    }

    /// Issues a token as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    /// Returns `AuthError::InvalidSecret` if the signing key is rejected.
    pub fn issue_at(&self, username: &str, now: i64) -> Result<AccessToken, AuthError> {
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: username.to_string(),
            exp: now.saturating_add(ttl_secs),
        };
        let payload = serde_json::to_vec(&claims).map_err(|_| AuthError::MalformedToken)?;
        let encoded = URL_SAFE_NO_PAD.encode(payload);
        let mut mac = self.mac()?;
        mac.update(encoded.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(AccessToken {
            access_token: format!("{encoded}.{signature}"),
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.ttl.as_secs(),
        })
    }

    /// Verifies a token and returns the principal it names.
    ///
    /// # Errors
    /// Returns `AuthError` if the token is malformed, tampered with, or expired.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies a token as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    /// Returns `AuthError` if the token is malformed, tampered with, or expired.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Principal, AuthError> {
        let (encoded, signature) = token.split_once('.').ok_or(AuthError::MalformedToken)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::MalformedToken)?;
        let mut mac = self.mac()?;
        mac.update(encoded.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::BadSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| AuthError::MalformedToken)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::MalformedToken)?;
        if claims.exp <= now {
            return Err(AuthError::Expired);
        }
        if claims.sub.is_empty() {
            return Err(AuthError::MalformedToken);
        }
        Ok(Principal {
            username: claims.sub,
        })
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|_| AuthError::InvalidSecret)
    }
}
