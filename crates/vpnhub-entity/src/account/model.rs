//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vpnhub_core::types::{AccountId, PackageId};

use super::role::Role;
use super::status::AccountStatus;

/// An admin, reseller, or end-user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Store-assigned identifier.
    pub id: AccountId,
    /// Unique login name.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account role. Immutable after creation.
    pub role: Role,
    /// Administrative status.
    pub status: AccountStatus,
    /// Optional display name.
    pub full_name: Option<String>,
    /// Package chosen at self-service signup.
    pub package_id: Option<PackageId>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account stops being usable (enforced for role `user` only).
    pub expires_at: DateTime<Utc>,
    /// Reseller that provisioned this account.
    pub reseller_id: Option<AccountId>,
}

impl Account {
    /// Whether the account has passed its expiry at `now`.
    ///
    /// Admin and reseller accounts never expire, whatever `expires_at` says.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.role.expires() && now >= self.expires_at
    }

    /// Whether this account was provisioned by the given reseller.
    pub fn is_owned_by(&self, reseller: AccountId) -> bool {
        self.reseller_id == Some(reseller)
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Desired username.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: Role,
    /// Optional display name.
    pub full_name: Option<String>,
    /// Package chosen at signup.
    pub package_id: Option<PackageId>,
    /// Expiry timestamp.
    pub expires_at: DateTime<Utc>,
    /// Owning reseller.
    pub reseller_id: Option<AccountId>,
}
