//! Membership roles and the capability matrix.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds within one group.
///
/// Variants are declared in ascending privilege so the derived ordering is
/// the privilege ordering: `Viewer < Member < Manager < Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Read-only access to the group and its tasks.
    Viewer,
    /// Creates tasks and changes the tasks they authored.
    Member,
    /// Changes any task in the group and adds members.
    Manager,
    /// Everything a manager can do, plus deleting the group.
    Owner,
}

impl Role {
    /// Every role in ascending privilege.
    pub const ALL: [Self; 4] = [Self::Viewer, Self::Member, Self::Manager, Self::Owner];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "VIEWER",
            Self::Member => "MEMBER",
            Self::Manager => "MANAGER",
            Self::Owner => "OWNER",
        }
    }

    /// Returns whether this role meets the threshold of `capability`.
    #[must_use]
    pub fn grants(self, capability: Capability) -> bool {
        self >= capability.min_role()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "VIEWER" => Ok(Self::Viewer),
            "MEMBER" => Ok(Self::Member),
            "MANAGER" => Ok(Self::Manager),
            "OWNER" => Ok(Self::Owner),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Named permission checked before a group or task operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Read group details.
    ViewGroup,
    /// Read the group's task lists.
    ListTasks,
    /// Create a task in the group.
    CreateTask,
    /// Update or delete a task the caller authored.
    ModifyOwnTask,
    /// Update or delete a task authored by someone else.
    ModifyAnyTask,
    /// Add another user to the group.
    AddMember,
    /// Delete the group with all its tasks and memberships.
    DeleteGroup,
}

impl Capability {
    /// Every capability.
    pub const ALL: [Self; 7] = [
        Self::ViewGroup,
        Self::ListTasks,
        Self::CreateTask,
        Self::ModifyOwnTask,
        Self::ModifyAnyTask,
        Self::AddMember,
        Self::DeleteGroup,
    ];

    /// Returns the lowest role that holds this capability.
    #[must_use]
    pub const fn min_role(self) -> Role {
        match self {
            Self::ViewGroup | Self::ListTasks => Role::Viewer,
            Self::CreateTask | Self::ModifyOwnTask => Role::Member,
            Self::ModifyAnyTask | Self::AddMember => Role::Manager,
            Self::DeleteGroup => Role::Owner,
        }
    }

    /// Returns a stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewGroup => "view_group",
            Self::ListTasks => "list_tasks",
            Self::CreateTask => "create_task",
            Self::ModifyOwnTask => "modify_own_task",
            Self::ModifyAnyTask => "modify_any_task",
            Self::AddMember => "add_member",
            Self::DeleteGroup => "delete_group",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
