//! Reseller provisioning quota.

pub mod enforcer;

pub use enforcer::{QuotaEnforcer, QuotaStatus};
