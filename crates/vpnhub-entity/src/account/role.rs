//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles an account can hold.
///
/// The set is closed: unknown strings fail to parse wherever a role enters
/// the system (requests, tokens, rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Unrestricted operator.
    Admin,
    /// Provisions end users within a quota.
    Reseller,
    /// End user of the VPN service.
    User,
}

impl Role {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Accounts with this role carry a finite expiry enforced at login.
    pub fn expires(&self) -> bool {
        matches!(self, Self::User)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Reseller => "reseller",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = vpnhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "reseller" => Ok(Self::Reseller),
            "user" => Ok(Self::User),
            _ => Err(vpnhub_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: admin, reseller, user"
            ))),
        }
    }
}
