//! Subscription package catalog configuration.

use serde::{Deserialize, Serialize};

/// One entry of the package catalog offered at signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Catalog identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Subscription length in days.
    pub days: i64,
    /// Price in the shop currency.
    pub price: f64,
    /// Short description.
    #[serde(default)]
    pub description: String,
}

impl PackageConfig {
    fn new(id: i64, name: &str, days: i64, price: f64, description: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            days,
            price,
            description: description.to_string(),
        }
    }
}

/// The catalog used when the configuration does not define one.
pub fn default_packages() -> Vec<PackageConfig> {
    vec![
        PackageConfig::new(1, "1 Month", 30, 2.99, "1 month VPN access"),
        PackageConfig::new(2, "3 Months", 90, 7.99, "3 months VPN access"),
        PackageConfig::new(3, "6 Months", 180, 14.99, "6 months VPN access"),
        PackageConfig::new(4, "12 Months", 365, 27.99, "12 months VPN access"),
    ]
}
