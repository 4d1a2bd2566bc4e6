//! Admin account management: staff account creation, listing, suspension,
//! and deletion.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use vpnhub_auth::credentials::CredentialGenerator;
use vpnhub_auth::password::PasswordHasher;
use vpnhub_auth::rbac::{AccessPolicy, Operation};
use vpnhub_core::error::AppError;
use vpnhub_core::types::AccountId;
use vpnhub_database::store::AccountStore;
use vpnhub_entity::account::expiry::staff_expiry;
use vpnhub_entity::account::{Account, AccountStatus, NewAccount, Role};

use super::provision::{
    IssuedCredentials, validate_email, validate_username, with_generated_username,
};
use crate::context::RequestContext;

/// Request to create an admin or reseller account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStaffRequest {
    /// Desired username; generated when absent.
    #[serde(default)]
    pub username: Option<String>,
    /// `admin` or `reseller`.
    #[serde(default)]
    pub role: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Accepted for compatibility; staff accounts do not expire.
    #[serde(default)]
    pub expiry_days: Option<i64>,
    /// Reseller quota; the configured default applies when absent.
    #[serde(default)]
    pub user_quota: Option<i32>,
}

/// Handles administrative account operations.
#[derive(Clone)]
pub struct AdminAccountService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<PasswordHasher>,
    policy: Arc<AccessPolicy>,
    generator: CredentialGenerator,
    default_reseller_quota: i32,
}

impl std::fmt::Debug for AdminAccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccountService")
            .field("default_reseller_quota", &self.default_reseller_quota)
            .finish_non_exhaustive()
    }
}

impl AdminAccountService {
    /// Creates a new admin account service.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<AccessPolicy>,
        default_reseller_quota: i32,
    ) -> Self {
        Self {
            store,
            hasher,
            policy,
            generator: CredentialGenerator::new(),
            default_reseller_quota,
        }
    }

    /// Creates an admin or reseller account with a generated one-time
    /// password. Resellers also receive a quota record.
    pub async fn create_staff(&self, req: CreateStaffRequest) -> Result<IssuedCredentials, AppError> {
        let role: Role = req.role.parse()?;
        if role == Role::User {
            return Err(AppError::validation(
                "Invalid role: only admin or reseller accounts can be registered",
            ));
        }

        let email = validate_email(&req.email)?.to_string();
        let quota = match role {
            Role::Reseller => {
                let quota = req.user_quota.unwrap_or(self.default_reseller_quota);
                if quota < 0 {
                    return Err(AppError::validation("user_quota cannot be negative"));
                }
                Some(quota)
            }
            _ => None,
        };

        let password = self.generator.password();
        let password_hash = self.hasher.hash_password(&password)?;
        let build = |username: String| NewAccount {
            username,
            email: email.clone(),
            password_hash: password_hash.clone(),
            role,
            full_name: None,
            package_id: None,
            expires_at: staff_expiry(),
            reseller_id: None,
        };

        let account = match req.username.map(|u| u.trim().to_string()) {
            Some(username) if !username.is_empty() => {
                validate_username(&username)?;
                self.store.create(&build(username), quota).await?
            }
            _ => {
                with_generated_username(&self.generator, |username| {
                    let data = build(username);
                    let store = Arc::clone(&self.store);
                    async move { store.create(&data, quota).await }
                })
                .await?
            }
        };

        info!(
            account_id = %account.id,
            role = %account.role,
            user_quota = ?quota,
            "Staff account created"
        );

        Ok(IssuedCredentials { account, password })
    }

    /// Lists every account, newest first.
    pub async fn list_accounts(&self, ctx: &RequestContext) -> Result<Vec<Account>, AppError> {
        self.policy.require(ctx.role, Operation::ListAllAccounts)?;
        self.store.list_all().await
    }

    /// Gets a single account by ID.
    pub async fn get_account(
        &self,
        ctx: &RequestContext,
        id: AccountId,
    ) -> Result<Account, AppError> {
        self.policy.require(ctx.role, Operation::ReadAnyAccount)?;

        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    /// Suspends an account; it can no longer log in.
    pub async fn suspend(&self, ctx: &RequestContext, id: AccountId) -> Result<Account, AppError> {
        self.policy.require(ctx.role, Operation::SuspendAccount)?;

        if id == ctx.account_id {
            return Err(AppError::authorization("Cannot suspend your own account"));
        }

        let account = self.store.update_status(id, AccountStatus::Suspended).await?;
        info!(admin_id = %ctx.account_id, target_id = %id, "Account suspended");
        Ok(account)
    }

    /// Reactivates a suspended account.
    pub async fn activate(&self, ctx: &RequestContext, id: AccountId) -> Result<Account, AppError> {
        self.policy.require(ctx.role, Operation::ActivateAccount)?;

        let account = self.store.update_status(id, AccountStatus::Active).await?;
        info!(admin_id = %ctx.account_id, target_id = %id, "Account activated");
        Ok(account)
    }

    /// Deletes an account.
    pub async fn delete(&self, ctx: &RequestContext, id: AccountId) -> Result<(), AppError> {
        self.policy.require(ctx.role, Operation::DeleteAnyAccount)?;

        if id == ctx.account_id {
            return Err(AppError::authorization("Cannot delete your own account"));
        }

        if !self.store.delete(id).await? {
            return Err(AppError::not_found(format!("Account {id} not found")));
        }

        info!(admin_id = %ctx.account_id, target_id = %id, "Account deleted");
        Ok(())
    }
}
