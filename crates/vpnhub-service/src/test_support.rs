//! Shared fixtures for service tests.

use std::sync::Arc;

use vpnhub_auth::jwt::TokenService;
use vpnhub_auth::password::PasswordHasher;
use vpnhub_auth::rbac::AccessPolicy;
use vpnhub_core::config::AuthConfig;
use vpnhub_core::config::package::default_packages;
use vpnhub_database::MemoryAccountStore;
use vpnhub_database::store::AccountStore;

use crate::account::{AccountService, AdminAccountService, ResellerService};
use crate::package::PackageCatalog;
use crate::quota::QuotaEnforcer;

pub(crate) struct Harness {
    pub store: Arc<dyn AccountStore>,
    pub tokens: Arc<TokenService>,
    pub hasher: Arc<PasswordHasher>,
    pub accounts: AccountService,
    pub admin: AdminAccountService,
    pub reseller: ResellerService,
}

pub(crate) fn harness() -> Harness {
    let auth = AuthConfig {
        jwt_secret: "service-test-secret-0123456789abcdef".to_string(),
        token_ttl_hours: 24,
        recheck_account_status: false,
        default_reseller_quota: 10,
    };
    let store: Arc<dyn AccountStore> = Arc::new(MemoryAccountStore::new());
    let tokens = Arc::new(TokenService::new(&auth).expect("valid auth config"));
    let hasher = Arc::new(PasswordHasher::new());
    let policy = Arc::new(AccessPolicy::new());
    let catalog = Arc::new(PackageCatalog::new(&default_packages()));
    let quota = Arc::new(QuotaEnforcer::new(Arc::clone(&store)));

    Harness {
        accounts: AccountService::new(
            Arc::clone(&store),
            Arc::clone(&tokens),
            Arc::clone(&hasher),
            Arc::clone(&policy),
            catalog,
        ),
        admin: AdminAccountService::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
            Arc::clone(&policy),
            auth.default_reseller_quota,
        ),
        reseller: ResellerService::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
            policy,
            quota,
        ),
        store,
        tokens,
        hasher,
    }
}
