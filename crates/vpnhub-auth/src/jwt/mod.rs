//! Session token issuance, verification, and claims.

pub mod claims;
pub mod service;

pub use claims::Claims;
pub use service::TokenService;
