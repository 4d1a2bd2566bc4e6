//! Shared application state passed to all handlers via Axum's `State`
//! extractor.

use std::sync::Arc;

use vpnhub_auth::jwt::TokenService;
use vpnhub_auth::password::PasswordHasher;
use vpnhub_auth::rbac::AccessPolicy;
use vpnhub_core::config::AppConfig;
use vpnhub_core::error::AppError;
use vpnhub_database::store::AccountStore;
use vpnhub_service::account::{AccountService, AdminAccountService, ResellerService};
use vpnhub_service::package::PackageCatalog;
use vpnhub_service::quota::QuotaEnforcer;

/// Application state shared across all request handlers.
///
/// Every field is an `Arc`, so cloning the state per request is cheap.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────────
    /// Application configuration.
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────────
    /// Account persistence.
    pub store: Arc<dyn AccountStore>,

    // ── Auth ─────────────────────────────────────────────────────
    /// Session token issuer and verifier.
    pub tokens: Arc<TokenService>,

    // ── Services ─────────────────────────────────────────────────
    /// Login, signup, and own-profile operations.
    pub account_service: Arc<AccountService>,
    /// Admin account management.
    pub admin_service: Arc<AdminAccountService>,
    /// Reseller provisioning and quota reporting.
    pub reseller_service: Arc<ResellerService>,
}

impl AppState {
    /// Wires the auth building blocks and services around `store`.
    ///
    /// Fails when the signing secret in `config.auth` is unusable.
    pub fn new(config: AppConfig, store: Arc<dyn AccountStore>) -> Result<Self, AppError> {
        let tokens = Arc::new(TokenService::new(&config.auth)?);
        let hasher = Arc::new(PasswordHasher::new());
        let policy = Arc::new(AccessPolicy::new());
        let catalog = Arc::new(PackageCatalog::new(&config.packages));
        let quota = Arc::new(QuotaEnforcer::new(Arc::clone(&store)));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&store),
            Arc::clone(&tokens),
            Arc::clone(&hasher),
            Arc::clone(&policy),
            catalog,
        ));
        let admin_service = Arc::new(AdminAccountService::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
            Arc::clone(&policy),
            config.auth.default_reseller_quota,
        ));
        let reseller_service = Arc::new(ResellerService::new(
            Arc::clone(&store),
            hasher,
            policy,
            quota,
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            tokens,
            account_service,
            admin_service,
            reseller_service,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("server", &self.config.server)
            .finish_non_exhaustive()
    }
}
