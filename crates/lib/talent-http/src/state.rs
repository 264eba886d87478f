use std::sync::Arc;
use std::time::Duration;

use surrealdb::Connection;
use talent_core::auth::TokenAuthority;
use talent_core::control::TalentControlPlane;

/// Shared handler state: control plane, token authority, and request deadline.
pub struct AppState<C: Connection> {
    pub(crate) control: TalentControlPlane<C>,
    pub(crate) tokens: Arc<TokenAuthority>,
    pub(crate) request_timeout: Duration,
}

impl<C: Connection> AppState<C> {
    #[must_use]
    pub fn new(
        control: TalentControlPlane<C>,
        tokens: TokenAuthority,
        request_timeout: Duration,
    ) -> Self {
        Self {
            control,
            tokens: Arc::new(tokens),
            request_timeout,
        }
    }
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            control: self.control.clone(),
            tokens: self.tokens.clone(),
            request_timeout: self.request_timeout,
        }
    }
}
