//! Bearer-token guard for protected routes.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use surrealdb::Connection;
use talent_core::auth::{AuthError, Principal};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller behind a valid bearer token. Adding it to a handler's
/// arguments makes the route require authentication.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

#[async_trait]
impl<C> FromRequestParts<AppState<C>> for CurrentUser
where
    C: Connection + Send + Sync + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<C>,
    ) -> Result<Self, Self::Rejection> {
        let token =
            bearer_token(parts).ok_or_else(|| ApiError::from(AuthError::MissingCredential))?;
        let principal = state
            .control
            .resolve_principal(token, &state.tokens)
            .await
            .map_err(|err| {
                warn!(path = %parts.uri.path(), "rejected bearer token: {err}");
                ApiError::from(err)
            })?;
        Ok(Self(principal))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}
