//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vpnhub_core::types::{AccountId, PackageId};
use vpnhub_entity::account::{Account, AccountStatus, Role};
use vpnhub_entity::package::Package;
use vpnhub_service::account::{IssuedCredentials, LoginOutcome, SignupOutcome};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Account profile. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: AccountId,
    /// Username.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Role.
    pub role: Role,
    /// Status.
    pub status: AccountStatus,
    /// Package bought at signup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<PackageId>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Owning reseller.
    pub reseller_id: Option<AccountId>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            full_name: account.full_name,
            role: account.role,
            status: account.status,
            package_id: account.package_id,
            created_at: account.created_at,
            expires_at: account.expires_at,
            reseller_id: account.reseller_id,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Session token.
    pub token: String,
    /// The authenticated account.
    pub user: AccountResponse,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.token,
            user: outcome.account.into(),
        }
    }
}

/// Self-service signup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Session token for the new account.
    pub token: String,
    /// Generated VPN username.
    pub username: String,
    /// The purchased package.
    pub package: Package,
    /// The created account.
    pub user: AccountResponse,
    /// Human-readable confirmation.
    pub message: String,
}

impl From<SignupOutcome> for SignupResponse {
    fn from(outcome: SignupOutcome) -> Self {
        let username = outcome.account.username.clone();
        Self {
            token: outcome.token,
            message: format!("Account created successfully! Your VPN username is: {username}"),
            username,
            package: outcome.package,
            user: outcome.account.into(),
        }
    }
}

/// Credentials of an admin-registered staff account. The password is
/// shown only in this response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCredentialsResponse {
    /// New account ID.
    pub user_id: AccountId,
    /// Username.
    pub username: String,
    /// One-time password.
    pub password: String,
    /// Role.
    pub role: Role,
    /// Contact email.
    pub email: String,
    /// Human-readable confirmation.
    pub message: String,
}

impl From<IssuedCredentials> for StaffCredentialsResponse {
    fn from(issued: IssuedCredentials) -> Self {
        Self {
            user_id: issued.account.id,
            username: issued.account.username,
            password: issued.password,
            role: issued.account.role,
            email: issued.account.email,
            message: "Account created successfully".to_string(),
        }
    }
}

/// Credentials of a reseller-provisioned end-user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredentialsResponse {
    /// New account ID.
    pub user_id: AccountId,
    /// Username.
    pub username: String,
    /// One-time password.
    pub password: String,
    /// Contact email.
    pub email: String,
    /// Role, always `user`.
    pub role: Role,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Human-readable confirmation.
    pub message: String,
}

impl From<IssuedCredentials> for UserCredentialsResponse {
    fn from(issued: IssuedCredentials) -> Self {
        Self {
            user_id: issued.account.id,
            username: issued.account.username,
            password: issued.password,
            email: issued.account.email,
            role: issued.account.role,
            expires_at: issued.account.expires_at,
            message: "User created successfully".to_string(),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Profile update response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdatedResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The updated account.
    pub user: AccountResponse,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `connected` or `unavailable`.
    pub database: String,
}
