//! Removal of expired end-user accounts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing;

use vpnhub_core::error::AppError;
use vpnhub_database::store::AccountStore;

/// Deletes every `user` account whose expiry lies strictly in the past.
///
/// Admin and reseller accounts are never touched. Running the sweep twice
/// in a row is harmless; the second run removes nothing.
#[derive(Clone)]
pub struct ExpirySweeper {
    store: Arc<dyn AccountStore>,
}

impl std::fmt::Debug for ExpirySweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpirySweeper").finish_non_exhaustive()
    }
}

impl ExpirySweeper {
    /// Create a new sweeper over the given store.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Run one sweep with `now` as the cut-off and return the number of
    /// removed accounts.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let removed = self.store.delete_expired_users(now).await?;
        tracing::info!(removed, cutoff = %now, "Expired user accounts swept");
        Ok(removed)
    }

    /// Scheduler entry point: sweeps and logs failures instead of
    /// propagating them, so the next tick retries.
    pub async fn tick(&self) {
        if let Err(e) = self.run_once(Utc::now()).await {
            tracing::error!(error = %e, "Expiry sweep failed");
        }
    }
}
