//! Role-based authorization for group and task operations.

use super::error::AuthorizationError;
use crate::board::{
    domain::{Capability, GroupId, Role, UserId},
    ports::BoardTransaction,
};
use tracing::warn;

/// Decides whether a user may exercise a capability in a group.
///
/// The engine holds no state; the membership is read through the
/// transaction of the operation being authorized so the decision and the
/// write that follows see the same data.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationEngine;

impl AuthorizationEngine {
    /// Creates an authorization engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks `capability` for `user_id` in `group_id` and returns the role
    /// held.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::NotAMember`] when the user has no role in
    /// the group, [`AuthorizationError::InsufficientRole`] when the role is
    /// below the capability threshold, and [`AuthorizationError::Store`] when
    /// the membership lookup fails.
    pub fn authorize(
        self,
        tx: &mut dyn BoardTransaction,
        user_id: UserId,
        group_id: GroupId,
        capability: Capability,
    ) -> Result<Role, AuthorizationError> {
        let role = tx
            .find_membership(user_id, group_id)?
            .map(|membership| membership.role());
        let decision = evaluate(user_id, group_id, role, capability);
        if let Err(ref denial) = decision {
            warn!(
                user_id = user_id.value(),
                group_id = group_id.value(),
                capability = capability.as_str(),
                reason = %denial,
                "authorization denied"
            );
        }
        decision
    }

    /// Checks whether `user_id` may change a task written by `author_id`.
    ///
    /// Authors need [`Capability::ModifyOwnTask`]; anyone else needs
    /// [`Capability::ModifyAnyTask`].
    ///
    /// # Errors
    ///
    /// See [`Self::authorize`].
    pub fn authorize_task_change(
        self,
        tx: &mut dyn BoardTransaction,
        user_id: UserId,
        group_id: GroupId,
        author_id: UserId,
    ) -> Result<Role, AuthorizationError> {
        self.authorize(tx, user_id, group_id, task_change_capability(user_id, author_id))
    }
}

/// Selects the capability needed to change a task.
#[must_use]
pub fn task_change_capability(user_id: UserId, author_id: UserId) -> Capability {
    if user_id == author_id {
        Capability::ModifyOwnTask
    } else {
        Capability::ModifyAnyTask
    }
}

/// Applies the capability matrix to a looked-up role.
///
/// # Errors
///
/// Returns [`AuthorizationError::NotAMember`] for `None` and
/// [`AuthorizationError::InsufficientRole`] when `role` is below the
/// threshold.
pub fn evaluate(
    user_id: UserId,
    group_id: GroupId,
    role: Option<Role>,
    capability: Capability,
) -> Result<Role, AuthorizationError> {
    let Some(actual) = role else {
        return Err(AuthorizationError::NotAMember { user_id, group_id });
    };
    if actual.grants(capability) {
        Ok(actual)
    } else {
        Err(AuthorizationError::InsufficientRole {
            capability,
            required: capability.min_role(),
            actual,
        })
    }
}
