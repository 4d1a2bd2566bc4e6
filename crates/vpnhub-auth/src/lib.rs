//! # vpnhub-auth
//!
//! Authentication and authorization building blocks for VPNHub.
//!
//! ## Modules
//!
//! - `jwt`: session token issuance and verification
//! - `password`: Argon2id password hashing and verification
//! - `credentials`: generated usernames and one-time passwords
//! - `rbac`: role to operation access policy

pub mod credentials;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use credentials::CredentialGenerator;
pub use jwt::{Claims, TokenService};
pub use password::PasswordHasher;
pub use rbac::{AccessPolicy, Operation};
