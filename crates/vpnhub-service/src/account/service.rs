//! Self-service account operations: login, signup, and the caller's own
//! profile.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use vpnhub_auth::credentials::CredentialGenerator;
use vpnhub_auth::jwt::TokenService;
use vpnhub_auth::password::PasswordHasher;
use vpnhub_auth::rbac::{AccessPolicy, Operation};
use vpnhub_core::error::AppError;
use vpnhub_core::types::PackageId;
use vpnhub_database::store::AccountStore;
use vpnhub_entity::account::expiry::expiry_after_days;
use vpnhub_entity::account::{Account, NewAccount, Role};
use vpnhub_entity::package::Package;

use super::provision::{validate_email, with_generated_username};
use crate::context::RequestContext;
use crate::package::PackageCatalog;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Handles authentication and self-service account operations.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    tokens: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
    policy: Arc<AccessPolicy>,
    catalog: Arc<PackageCatalog>,
    generator: CredentialGenerator,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Session token.
    pub token: String,
    /// The authenticated account.
    pub account: Account,
}

/// Self-service signup input.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    /// Contact email, unique among signups.
    #[serde(default)]
    pub email: String,
    /// Chosen password.
    #[serde(default)]
    pub password: String,
    /// Package from the catalog; zero means "not chosen".
    #[serde(default)]
    pub package_id: i64,
    /// Optional display name.
    #[serde(default)]
    pub full_name: Option<String>,
}

/// A successful signup: the new account is logged in immediately.
#[derive(Debug, Clone)]
pub struct SignupOutcome {
    /// Session token.
    pub token: String,
    /// The created account.
    pub account: Account,
    /// The purchased package.
    pub package: Package,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        store: Arc<dyn AccountStore>,
        tokens: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<AccessPolicy>,
        catalog: Arc<PackageCatalog>,
    ) -> Self {
        Self {
            store,
            tokens,
            hasher,
            policy,
            catalog,
            generator: CredentialGenerator::new(),
        }
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Unknown usernames and wrong passwords fail identically, and both
    /// paths run one hash verification.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation("Username and password are required"));
        }

        let Some(account) = self.store.find_by_username(username).await? else {
            self.hasher.verify_dummy(password)?;
            info!(username = %username, "Login failed: unknown username");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &account.password_hash)? {
            info!(account_id = %account.id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        if !account.status.can_login() {
            warn!(account_id = %account.id, "Login rejected: account suspended");
            return Err(AppError::authorization("User account is suspended"));
        }

        if account.is_expired_at(Utc::now()) {
            info!(account_id = %account.id, expires_at = %account.expires_at, "Login rejected: account expired");
            return Err(AppError::authorization("User account has expired"));
        }

        let token = self.tokens.issue(account.id, account.role)?;
        info!(account_id = %account.id, role = %account.role, "Login succeeded");

        Ok(LoginOutcome { token, account })
    }

    /// Creates a `user` account for a package purchase and logs it in.
    pub async fn signup(&self, req: SignupRequest) -> Result<SignupOutcome, AppError> {
        let email = validate_email(&req.email)?;

        if self.store.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("Email address is already registered"));
        }

        if req.password.is_empty() || req.package_id == 0 {
            return Err(AppError::validation(
                "Email, password, and package selection are required",
            ));
        }

        let package = self.catalog.find(PackageId::new(req.package_id))?.clone();
        let expires_at = expiry_after_days(Utc::now(), package.days)?;
        let password_hash = self.hasher.hash_password(&req.password)?;
        let full_name = req
            .full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let account = with_generated_username(&self.generator, |username| {
            let data = NewAccount {
                username,
                email: email.to_string(),
                password_hash: password_hash.clone(),
                role: Role::User,
                full_name: full_name.clone(),
                package_id: Some(package.id),
                expires_at,
                reseller_id: None,
            };
            let store = Arc::clone(&self.store);
            async move { store.create(&data, None).await }
        })
        .await?;

        let token = self.tokens.issue(account.id, account.role)?;
        info!(
            account_id = %account.id,
            package_id = %package.id,
            expires_at = %account.expires_at,
            "Self-service signup completed"
        );

        Ok(SignupOutcome {
            token,
            account,
            package,
        })
    }

    /// Returns the caller's own account.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<Account, AppError> {
        self.policy.require(ctx.role, Operation::ReadOwnProfile)?;

        self.store
            .find_by_id(ctx.account_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Replaces the caller's email.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        email: &str,
    ) -> Result<Account, AppError> {
        self.policy.require(ctx.role, Operation::UpdateOwnProfile)?;
        let email = validate_email(email)?;

        if let Some(existing) = self.store.find_by_email(email).await? {
            if existing.id != ctx.account_id {
                return Err(AppError::conflict("Email is already in use"));
            }
        }

        let account = self.store.update_email(ctx.account_id, email).await?;
        info!(account_id = %ctx.account_id, "Profile updated");
        Ok(account)
    }

    /// Deletes the caller's own account. Only `user` accounts may do this.
    pub async fn delete_self(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.policy.require(ctx.role, Operation::DeleteOwnAccount)?;

        if !self.store.delete(ctx.account_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(account_id = %ctx.account_id, "Account deleted by owner");
        Ok(())
    }

    /// The package catalog.
    pub fn packages(&self) -> &[Package] {
        self.catalog.list()
    }
}
