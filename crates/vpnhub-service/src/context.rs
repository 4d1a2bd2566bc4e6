//! Request context carrying the authenticated account and its role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vpnhub_auth::jwt::Claims;
use vpnhub_core::types::AccountId;
use vpnhub_entity::account::Role;

/// Context for the current authenticated request.
///
/// Built by the API extractor from verified token claims and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account's ID.
    pub account_id: AccountId,
    /// The role recorded in the token.
    pub role: Role,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(account_id: AccountId, role: Role) -> Self {
        Self {
            account_id,
            role,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&Claims> for RequestContext {
    fn from(claims: &Claims) -> Self {
        Self::new(claims.account_id(), claims.role)
    }
}
