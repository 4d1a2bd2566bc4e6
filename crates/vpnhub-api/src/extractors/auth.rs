//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header, verifies it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use vpnhub_core::error::AppError;
use vpnhub_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated caller available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Authorization header required"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Invalid authorization header format"))?;

        let claims = state.tokens.verify(token)?;

        // Tokens are otherwise trusted until they expire.
        if state.config.auth.recheck_account_status {
            let account = state
                .store
                .find_by_id(claims.account_id())
                .await?
                .ok_or_else(|| {
                    debug!(account_id = %claims.sub, "Token refers to a deleted account");
                    AppError::authentication("Account no longer exists")
                })?;

            if !account.status.can_login() {
                return Err(AppError::authorization("User account is suspended"));
            }
        }

        Ok(AuthUser(RequestContext::from(&claims)))
    }
}
