//! Domain model for groups, memberships and tasks.
//!
//! All types here are free of infrastructure concerns. Identifiers are
//! numeric and assigned by storage; records that have not been stored yet are
//! represented by the `New*` types.

mod error;
mod group;
mod ids;
mod membership;
mod position;
mod role;
mod task;

pub use error::{BoardDomainError, ParseRoleError, ParseTaskStatusError};
pub use group::{Group, GroupName, NewGroup, PersistedGroupData};
pub use ids::{GroupId, MembershipId, TaskId};
pub use membership::{Membership, NewMembership, PersistedMembershipData};
pub use position::PositionKey;
pub use role::{Capability, Role};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, TaskStatus, TaskTitle};

pub use crate::identity::domain::UserId;
