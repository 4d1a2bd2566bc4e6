//! Reseller-scoped operations: provisioning end users within quota.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use vpnhub_auth::credentials::CredentialGenerator;
use vpnhub_auth::password::PasswordHasher;
use vpnhub_auth::rbac::{AccessPolicy, Operation};
use vpnhub_core::error::AppError;
use vpnhub_database::store::AccountStore;
use vpnhub_entity::account::expiry::expiry_from_months_and_days;
use vpnhub_entity::account::{Account, NewAccount, Role};

use super::provision::{IssuedCredentials, validate_email, with_generated_username};
use crate::context::RequestContext;
use crate::quota::{QuotaEnforcer, QuotaStatus};

/// Handles reseller provisioning.
#[derive(Clone)]
pub struct ResellerService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<PasswordHasher>,
    policy: Arc<AccessPolicy>,
    quota: Arc<QuotaEnforcer>,
    generator: CredentialGenerator,
}

impl std::fmt::Debug for ResellerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResellerService").finish_non_exhaustive()
    }
}

impl ResellerService {
    /// Creates a new reseller service.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<PasswordHasher>,
        policy: Arc<AccessPolicy>,
        quota: Arc<QuotaEnforcer>,
    ) -> Self {
        Self {
            store,
            hasher,
            policy,
            quota,
            generator: CredentialGenerator::new(),
        }
    }

    /// Creates a `user` account valid for `expiry_days`.
    ///
    /// Resellers own the account and consume quota; admins create an
    /// unowned account without a quota check.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        email: &str,
        expiry_days: i64,
    ) -> Result<IssuedCredentials, AppError> {
        self.policy.require(ctx.role, Operation::ProvisionUser)?;

        let email = validate_email(email)?;
        let expires_at = expiry_from_months_and_days(Utc::now(), expiry_days)?;
        let owner = (!ctx.is_admin()).then_some(ctx.account_id);

        if let Some(reseller) = owner {
            self.quota.check_and_reserve(reseller).await?;
        }

        let password = self.generator.password();
        let password_hash = self.hasher.hash_password(&password)?;

        let account = with_generated_username(&self.generator, |username| {
            let data = NewAccount {
                username,
                email: email.to_string(),
                password_hash: password_hash.clone(),
                role: Role::User,
                full_name: None,
                package_id: None,
                expires_at,
                reseller_id: owner,
            };
            let store = Arc::clone(&self.store);
            let quota = Arc::clone(&self.quota);
            async move {
                match owner {
                    Some(reseller) => quota.provision(reseller, &data).await,
                    None => store.create(&data, None).await,
                }
            }
        })
        .await?;

        info!(
            caller_id = %ctx.account_id,
            account_id = %account.id,
            expires_at = %account.expires_at,
            "User account provisioned"
        );

        Ok(IssuedCredentials { account, password })
    }

    /// Accounts provisioned by the caller, newest first.
    pub async fn list_own(&self, ctx: &RequestContext) -> Result<Vec<Account>, AppError> {
        self.policy.require(ctx.role, Operation::ListOwnUsers)?;
        self.store.list_by_reseller(ctx.account_id).await
    }

    /// The caller's quota usage. Admins are reported as unlimited.
    pub async fn quota(&self, ctx: &RequestContext) -> Result<QuotaStatus, AppError> {
        self.policy.require(ctx.role, Operation::ViewOwnQuota)?;

        if ctx.is_admin() {
            self.quota.unlimited(ctx.account_id).await
        } else {
            self.quota.status(ctx.account_id).await
        }
    }
}
