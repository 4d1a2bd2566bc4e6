//! Scheduler for periodic maintenance tasks.

use std::time::Duration;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use vpnhub_core::config::WorkerConfig;
use vpnhub_core::error::AppError;

use crate::jobs::ExpirySweeper;

/// Drives periodic background tasks.
pub struct CronScheduler {
    scheduler: JobScheduler,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new scheduler.
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler })
    }

    /// Register the expiry sweep. The first run happens one interval after
    /// the scheduler starts.
    pub async fn register_expiry_sweep(
        &self,
        sweeper: ExpirySweeper,
        config: &WorkerConfig,
    ) -> Result<(), AppError> {
        let hours = config.sweep_interval_hours;
        let interval = Duration::from_secs(hours.saturating_mul(3600));

        let job = CronJob::new_repeated_async(interval, move |_uuid, _lock| {
            let sweeper = sweeper.clone();
            Box::pin(async move {
                tracing::debug!("Running expiry sweep");
                sweeper.tick().await;
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create expiry_sweep schedule: {}", e)))?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add expiry_sweep schedule: {}", e))
        })?;

        tracing::info!(interval_hours = hours, "Registered: expiry_sweep");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
