//! Membership rows binding a user to a group with a role.

use super::{GroupId, MembershipId, Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A membership that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMembership {
    user_id: UserId,
    group_id: GroupId,
    role: Role,
    created_at: DateTime<Utc>,
}

impl NewMembership {
    /// Creates a membership record for `user_id` in `group_id`.
    #[must_use]
    pub const fn new(
        user_id: UserId,
        group_id: GroupId,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            group_id,
            role,
            created_at,
        }
    }

    /// Returns the member.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the group.
    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Returns the granted role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches the storage-assigned identifier.
    #[must_use]
    pub const fn into_membership(self, id: MembershipId) -> Membership {
        Membership {
            id,
            user_id: self.user_id,
            group_id: self.group_id,
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// A stored membership. At most one exists per `(user_id, group_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    id: MembershipId,
    user_id: UserId,
    group_id: GroupId,
    role: Role,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMembershipData {
    /// Persisted identifier.
    pub id: MembershipId,
    /// Persisted member.
    pub user_id: UserId,
    /// Persisted group.
    pub group_id: GroupId,
    /// Persisted role.
    pub role: Role,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedMembershipData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            group_id: data.group_id,
            role: data.role,
            created_at: data.created_at,
        }
    }

    /// Returns the membership identifier.
    #[must_use]
    pub const fn id(&self) -> MembershipId {
        self.id
    }

    /// Returns the member.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the group.
    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Returns the member's role in the group.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
