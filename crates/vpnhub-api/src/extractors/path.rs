//! Typed path parameter helpers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use vpnhub_core::error::AppError;
use vpnhub_core::types::AccountId;

/// Parses a positive account ID from a path segment.
pub fn parse_account_id(s: &str) -> Result<AccountId, AppError> {
    s.parse::<AccountId>()
        .ok()
        .filter(|id| id.get() > 0)
        .ok_or_else(|| AppError::validation("Invalid user ID"))
}

/// The `{id}` segment of `/admin/users/{id}/...` routes.
#[derive(Debug, Clone, Copy)]
pub struct AccountIdPath(pub AccountId);

impl<S> FromRequestParts<S> for AccountIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation("Invalid user ID"))?;
        parse_account_id(&raw).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_id() {
        assert_eq!(parse_account_id("42").unwrap(), AccountId::new(42));
        for bad in ["abc", "0", "-3", "", "1.5"] {
            assert_eq!(parse_account_id(bad).unwrap_err().message, "Invalid user ID");
        }
    }
}
