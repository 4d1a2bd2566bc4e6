//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Minimum accepted length of the JWT signing secret, in bytes.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Authentication and credential configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Required; left empty when
    /// absent so that validation can report it.
    #[serde(default)]
    pub jwt_secret: String,
    /// Session token TTL in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Re-read the account on every authenticated request and reject
    /// suspended or deleted accounts before their token expires.
    #[serde(default)]
    pub recheck_account_status: bool,
    /// Quota assigned to a new reseller when the request does not carry one.
    #[serde(default = "default_reseller_quota")]
    pub default_reseller_quota: i32,
}

impl AuthConfig {
    /// Rejects configurations that would sign tokens with a missing or weak secret.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set (JWT_SECRET or VPNHUB__AUTH__JWT_SECRET)",
            ));
        }
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_JWT_SECRET_LEN} bytes long"
            )));
        }
        if self.token_ttl_hours == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_hours must be greater than zero",
            ));
        }
        if self.default_reseller_quota < 0 {
            return Err(AppError::configuration(
                "auth.default_reseller_quota cannot be negative",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"****")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("recheck_account_status", &self.recheck_account_status)
            .field("default_reseller_quota", &self.default_reseller_quota)
            .finish()
    }
}

fn default_token_ttl() -> u64 {
    24
}

fn default_reseller_quota() -> i32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: 24,
            recheck_account_status: false,
            default_reseller_quota: 10,
        }
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(config("").validate().is_err());
        assert!(config("   ").validate().is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(config("your-secret-key-change-this").validate().is_err());
    }

    #[test]
    fn test_long_secret_accepted() {
        assert!(config("0123456789abcdef0123456789abcdef").validate().is_ok());
    }

    #[test]
    fn test_debug_masks_secret() {
        let rendered = format!("{:?}", config("0123456789abcdef0123456789abcdef"));
        assert!(!rendered.contains("0123456789abcdef"));
    }
}
