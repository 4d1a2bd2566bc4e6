//! Access checks used as a guard by every protected endpoint.

use tracing::debug;

use vpnhub_core::error::AppError;
use vpnhub_entity::account::Role;

use super::policies::{AccessPolicies, Operation};

/// Enforces the role to operation table.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    policies: AccessPolicies,
}

impl AccessPolicy {
    /// Creates a policy guard with the default table.
    pub fn new() -> Self {
        Self {
            policies: AccessPolicies::new(),
        }
    }

    /// Returns `Ok(())` if allowed, or an authorization error if denied.
    pub fn require(&self, role: Role, operation: Operation) -> Result<(), AppError> {
        if self.policies.allows(role, operation) {
            Ok(())
        } else {
            debug!(role = %role, operation = ?operation, "Operation denied");
            Err(AppError::authorization(operation.denial_message()))
        }
    }

    /// Boolean variant of [`AccessPolicy::require`].
    pub fn allows(&self, role: Role, operation: Operation) -> bool {
        self.policies.allows(role, operation)
    }
}
