//! Request DTOs.
//!
//! Fields default when absent so that missing values surface as the
//! services' validation messages rather than as deserialization errors.

use serde::{Deserialize, Serialize};

pub use vpnhub_service::account::{CreateStaffRequest, SignupRequest};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

/// Update profile request. Only the email can change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New contact email.
    #[serde(default)]
    pub email: String,
}

/// Reseller request to provision an end-user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Contact email for the new account.
    #[serde(default)]
    pub email: String,
    /// Validity in days, 1 to 3650.
    #[serde(default)]
    pub expiry_days: i64,
}
