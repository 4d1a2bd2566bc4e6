//! Shared helpers for creating accounts with generated credentials.

use std::future::Future;

use tracing::debug;

use vpnhub_auth::credentials::CredentialGenerator;
use vpnhub_core::error::{AppError, ErrorKind};
use vpnhub_entity::account::Account;

/// Attempts made to find a free generated username.
pub const USERNAME_ATTEMPTS: usize = 5;

/// An account together with the one-time password generated for it.
///
/// The plaintext password exists only in this value; the store keeps the
/// hash.
#[derive(Debug, Clone)]
pub struct IssuedCredentials {
    /// The created account.
    pub account: Account,
    /// Generated one-time password.
    pub password: String,
}

/// Runs `insert` with fresh generated usernames until one does not collide.
pub(crate) async fn with_generated_username<F, Fut>(
    generator: &CredentialGenerator,
    mut insert: F,
) -> Result<Account, AppError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Account, AppError>>,
{
    for attempt in 1..=USERNAME_ATTEMPTS {
        match insert(generator.username()).await {
            Err(e) if e.is(ErrorKind::Conflict) => {
                debug!(attempt, "Generated username collided, retrying");
            }
            other => return other,
        }
    }
    Err(AppError::internal(
        "Could not allocate a unique username, try again",
    ))
}

/// Checks the minimal email shape accepted by every account path.
pub(crate) fn validate_email(email: &str) -> Result<&str, AppError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    if !email.contains('@') {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(email)
}

/// Admin-chosen usernames: 3 to 64 characters of `[A-Za-z0-9_.-]`.
pub(crate) fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(3..=64).contains(&len) {
        return Err(AppError::validation(
            "Username must be between 3 and 64 characters",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(AppError::validation(
            "Username may only contain letters, digits, '_', '.' and '-'",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("ops.admin-1").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email(" a@b.c ").unwrap(), "a@b.c");
        assert!(validate_email("").is_err());
        assert!(validate_email("nope").is_err());
    }

    #[tokio::test]
    async fn test_gives_up_after_repeated_collisions() {
        let generator = CredentialGenerator::new();
        let mut calls = 0;
        let result = with_generated_username(&generator, |_| {
            calls += 1;
            async { Err::<Account, _>(AppError::conflict("taken")) }
        })
        .await;
        assert!(result.unwrap_err().is(ErrorKind::Internal));
        assert_eq!(calls, USERNAME_ATTEMPTS);
    }
}
