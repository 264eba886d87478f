use surrealdb::Connection;
use talent_store::models::{RegisterRequest, User, UserProfile};
use tracing::{info, warn};

use crate::auth::{self, AccessToken, AuthError, Principal, TokenAuthority};

use super::{ControlError, TalentControlPlane, invalid_input};

impl<C: Connection> TalentControlPlane<C> {
    /// Registers a user with a hashed password.
    ///
    /// # Errors
    /// Returns `ControlError` if the payload is invalid, the username is taken,
    /// or the store write fails.
    pub async fn register_user(&self, request: RegisterRequest) -> Result<User, ControlError> {
        let RegisterRequest {
            username,
            password,
            email,
            full_name,
        } = request;

        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(invalid_input("username is required"));
        }
        if password.is_empty() {
            return Err(invalid_input("password is required"));
        }

        let user = User {
            username,
            email,
            full_name,
            disabled: false,
            hashed_password: Some(auth::hash_password(&password)?),
        };
        let stored = self.store.create_user(user).await?;
        info!(username = %stored.username, "user registered");
        Ok(stored)
    }

    /// Seeds a new user profile without credentials. Existing accounts are
    /// never modified.
    ///
    /// # Errors
    /// Returns `ControlError` if the payload is invalid, the username is taken,
    /// or the store write fails.
    pub async fn populate_user(&self, profile: UserProfile) -> Result<User, ControlError> {
        let UserProfile {
            username,
            email,
            full_name,
            disabled,
        } = profile;

        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(invalid_input("username is required"));
        }

        let user = User {
            username,
            email,
            full_name,
            disabled,
            hashed_password: None,
        };
        let stored = self.store.create_user(user).await?;
        info!(username = %stored.username, "user populated");
        Ok(stored)
    }

    /// Checks a username and password and issues an access token.
    ///
    /// # Errors
    /// Returns `ControlError::Auth` for unknown users, wrong passwords, users
    /// without credentials, and disabled users.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        tokens: &TokenAuthority,
    ) -> Result<AccessToken, ControlError> {
        let Some(user) = self.store.get_user(username.trim()).await? else {
            warn!(%username, "login for unknown user");
            return Err(AuthError::InvalidCredentials.into());
        };
        let verified = user
            .hashed_password
            .as_deref()
            .is_some_and(|stored| auth::verify_password(password, stored));
        if !verified {
            warn!(%username, "login with bad password");
            return Err(AuthError::InvalidCredentials.into());
        }
        if user.disabled {
            return Err(AuthError::Disabled(user.username).into());
        }
        Ok(tokens.issue(&user.username)?)
    }

    /// Resolves a bearer token to an active user.
    ///
    /// # Errors
    /// Returns `ControlError::Auth` if the token is invalid or names a user
    /// that no longer exists or is disabled.
    pub async fn resolve_principal(
        &self,
        token: &str,
        tokens: &TokenAuthority,
    ) -> Result<Principal, ControlError> {
        let principal = tokens.verify(token)?;
        match self.store.get_user(&principal.username).await? {
            Some(user) if user.disabled => Err(AuthError::Disabled(user.username).into()),
            Some(_) => Ok(principal),
            None => Err(AuthError::InvalidCredentials.into()),
        }
    }
}
