//! Package catalog entry.

use serde::{Deserialize, Serialize};
use vpnhub_core::config::PackageConfig;
use vpnhub_core::types::PackageId;

/// A fixed catalog entry. Only its duration is used, to compute the
/// expiry of a self-service signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Catalog identifier.
    pub id: PackageId,
    /// Display name.
    pub name: String,
    /// Subscription length in days.
    pub days: i64,
    /// Price.
    pub price: f64,
    /// Short description.
    pub description: String,
}

impl From<&PackageConfig> for Package {
    fn from(config: &PackageConfig) -> Self {
        Self {
            id: PackageId::new(config.id),
            name: config.name.clone(),
            days: config.days,
            price: config.price,
            description: config.description.clone(),
        }
    }
}
