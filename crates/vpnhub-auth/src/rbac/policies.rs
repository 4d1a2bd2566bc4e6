//! Role-to-operation mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use vpnhub_entity::account::Role;

/// Every protected operation exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    // Own profile
    /// Read the caller's own profile.
    ReadOwnProfile,
    /// Change the caller's own email.
    UpdateOwnProfile,
    /// Delete the caller's own account.
    DeleteOwnAccount,

    // Reseller scope
    /// Provision an end-user account.
    ProvisionUser,
    /// List accounts provisioned by the caller.
    ListOwnUsers,
    /// Read the caller's provisioning quota.
    ViewOwnQuota,

    // Administration
    /// List every account.
    ListAllAccounts,
    /// Read any account.
    ReadAnyAccount,
    /// Suspend an account.
    SuspendAccount,
    /// Reactivate a suspended account.
    ActivateAccount,
    /// Delete any account.
    DeleteAnyAccount,
}

impl Operation {
    /// Message returned when a role lacks this operation.
    pub fn denial_message(&self) -> &'static str {
        match self {
            Self::ReadOwnProfile | Self::UpdateOwnProfile => "Access denied",
            Self::DeleteOwnAccount => "Only user accounts can delete themselves",
            Self::ProvisionUser | Self::ListOwnUsers | Self::ViewOwnQuota => {
                "Reseller access required"
            }
            Self::ListAllAccounts
            | Self::ReadAnyAccount
            | Self::SuspendAccount
            | Self::ActivateAccount
            | Self::DeleteAnyAccount => "Admin access required",
        }
    }
}

/// Defines the mapping from each role to its set of allowed operations.
#[derive(Debug, Clone)]
pub struct AccessPolicies {
    policies: HashMap<Role, HashSet<Operation>>,
}

impl AccessPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        use Operation::*;

        let mut policies = HashMap::new();

        // User: own profile, and may close their own account
        policies.insert(
            Role::User,
            [ReadOwnProfile, UpdateOwnProfile, DeleteOwnAccount]
                .into_iter()
                .collect(),
        );

        // Reseller: own profile + reseller scope
        policies.insert(
            Role::Reseller,
            [
                ReadOwnProfile,
                UpdateOwnProfile,
                ProvisionUser,
                ListOwnUsers,
                ViewOwnQuota,
            ]
            .into_iter()
            .collect(),
        );

        // Admin: everything except self-deletion
        policies.insert(
            Role::Admin,
            [
                ReadOwnProfile,
                UpdateOwnProfile,
                ProvisionUser,
                ListOwnUsers,
                ViewOwnQuota,
                ListAllAccounts,
                ReadAnyAccount,
                SuspendAccount,
                ActivateAccount,
                DeleteAnyAccount,
            ]
            .into_iter()
            .collect(),
        );

        Self { policies }
    }

    /// Checks whether the given role may perform the operation.
    pub fn allows(&self, role: Role, operation: Operation) -> bool {
        self.policies
            .get(&role)
            .is_some_and(|ops| ops.contains(&operation))
    }
}

impl Default for AccessPolicies {
    fn default() -> Self {
        Self::new()
    }
}
