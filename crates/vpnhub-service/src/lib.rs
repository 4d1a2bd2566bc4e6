//! # vpnhub-service
//!
//! Business logic service layer for VPNHub. Each service orchestrates the
//! account store, token service, password hasher, and access policy to
//! implement one family of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod context;
pub mod package;
pub mod quota;

pub use account::{AccountService, AdminAccountService, IssuedCredentials, ResellerService};
pub use context::RequestContext;
pub use package::PackageCatalog;
pub use quota::{QuotaEnforcer, QuotaStatus};

#[cfg(test)]
pub(crate) mod test_support;
