//! Scheduled background tasks for VPNHub.
//!
//! This crate provides:
//! - A cron scheduler that drives periodic tasks
//! - The expiry sweep that removes lapsed end-user accounts

pub mod jobs;
pub mod scheduler;

pub use jobs::ExpirySweeper;
pub use scheduler::CronScheduler;
