//! Role-based access control (RBAC) enforcement.

pub mod enforcer;
pub mod policies;

pub use enforcer::AccessPolicy;
pub use policies::{AccessPolicies, Operation};
