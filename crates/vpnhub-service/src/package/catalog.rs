//! Read-only catalog of packages loaded from configuration.

use vpnhub_core::config::PackageConfig;
use vpnhub_core::error::AppError;
use vpnhub_core::types::PackageId;
use vpnhub_entity::package::Package;

/// Packages offered at signup, in configuration order.
#[derive(Debug, Clone)]
pub struct PackageCatalog {
    packages: Vec<Package>,
}

impl PackageCatalog {
    /// Builds the catalog from configuration entries.
    pub fn new(config: &[PackageConfig]) -> Self {
        Self {
            packages: config.iter().map(Package::from).collect(),
        }
    }

    /// All packages.
    pub fn list(&self) -> &[Package] {
        &self.packages
    }

    /// Looks up a package, failing with `NotFound` for unknown ids.
    pub fn find(&self, id: PackageId) -> Result<&Package, AppError> {
        self.packages
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("Invalid package selected"))
    }
}
