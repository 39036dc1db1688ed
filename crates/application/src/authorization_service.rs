use std::sync::Arc;

use encore_core::{AppError, AppResult};
use encore_domain::{AccessPolicy, Capabilities, Permission};
use serde::{Deserialize, Serialize};
use tracing::debug;

mod surfaces;


/// Authenticated caller, as resolved by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    subject: String,
    role: String,
}

impl Actor {
    /// Creates an actor from a subject and its role transport value.
    #[must_use]
    pub fn new(subject: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            role: role.into(),
        }
    }

    /// Returns the stable subject identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the role transport value. Unknown roles hold no permissions.
    #[must_use]
    pub fn role(&self) -> &str {
        self.role.as_str()
    }
}

/// Application service for role-based authorization checks.
#[derive(Debug, Clone)]
pub struct AuthorizationService {
    policy: Arc<AccessPolicy>,
}

impl AuthorizationService {
    /// Creates a new authorization service around a policy table.
    #[must_use]
    pub fn new(policy: AccessPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    /// Returns the policy table in use.
    #[must_use]
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Ensures the actor's role holds the required permission.
    pub fn require_permission(&self, actor: &Actor, permission: Permission) -> AppResult<()> {
        if self.has_permission(actor, permission) {
            return Ok(());
        }

        debug!(
            subject = %actor.subject(),
            role = %actor.role(),
            permission = permission.as_str(),
            "permission check denied"
        );

        Err(AppError::Forbidden(format!(
            "subject '{}' with role '{}' is missing permission '{}'",
            actor.subject(),
            actor.role(),
            permission.as_str()
        )))
    }

    /// Returns whether the actor's role holds the permission.
    #[must_use]
    pub fn has_permission(&self, actor: &Actor, permission: Permission) -> bool {
        self.policy.has_permission(actor.role(), permission)
    }

    /// Derives capability flags for the actor's current role.
    #[must_use]
    pub fn capabilities(&self, actor: &Actor) -> Capabilities {
        self.policy.capabilities(actor.role())
    }
}

impl Default for AuthorizationService {
    fn default() -> Self {
        Self::new(AccessPolicy::standard())
    }
}
