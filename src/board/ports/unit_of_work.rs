//! Transactional unit-of-work port for groups, memberships and tasks.

use crate::board::domain::{
    Group, GroupId, Membership, NewGroup, NewMembership, NewTask, PositionKey, Task, TaskId,
    TaskStatus, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board storage statements.
pub type BoardStoreResult<T> = Result<T, BoardStoreError>;

/// Statements available inside one storage transaction.
///
/// Every write that could violate a uniqueness invariant is checked by the
/// storage itself and fails with a distinct error variant, so the check and
/// the write cannot be separated by a concurrent writer.
#[cfg_attr(test, mockall::automock)]
pub trait BoardTransaction {
    /// Inserts a group and returns it with its assigned identifier.
    fn insert_group(&mut self, group: &NewGroup) -> BoardStoreResult<Group>;

    /// Finds a group by identifier.
    fn find_group(&mut self, id: GroupId) -> BoardStoreResult<Option<Group>>;

    /// Returns every group in which `user_id` holds a membership.
    fn groups_for_user(&mut self, user_id: UserId) -> BoardStoreResult<Vec<Group>>;

    /// Deletes a group row and returns the number of rows removed.
    fn delete_group(&mut self, id: GroupId) -> BoardStoreResult<u64>;

    /// Inserts a membership.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::DuplicateMembership`] when the user already
    /// holds a role in the group.
    fn insert_membership(&mut self, membership: &NewMembership) -> BoardStoreResult<Membership>;

    /// Finds the membership of `user_id` in `group_id`.
    fn find_membership(
        &mut self,
        user_id: UserId,
        group_id: GroupId,
    ) -> BoardStoreResult<Option<Membership>>;

    /// Deletes every membership of a group and returns the count removed.
    fn delete_memberships_for_group(&mut self, group_id: GroupId) -> BoardStoreResult<u64>;

    /// Inserts a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::DuplicatePosition`] when another task in the
    /// same group and status already holds the position key.
    fn insert_task(&mut self, task: &NewTask) -> BoardStoreResult<Task>;

    /// Finds a task by identifier, scoped to its group.
    fn find_task(&mut self, group_id: GroupId, task_id: TaskId) -> BoardStoreResult<Option<Task>>;

    /// Finds the task occupying a position, if any.
    fn find_task_at(
        &mut self,
        group_id: GroupId,
        status: TaskStatus,
        position_key: &PositionKey,
    ) -> BoardStoreResult<Option<Task>>;

    /// Overwrites a stored task and returns the number of rows changed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::DuplicatePosition`] when the new position is
    /// held by another task.
    fn update_task(&mut self, task: &Task) -> BoardStoreResult<u64>;

    /// Deletes a task and returns the number of rows removed. Deleting an
    /// absent task removes nothing and is not an error.
    fn delete_task(&mut self, group_id: GroupId, task_id: TaskId) -> BoardStoreResult<u64>;

    /// Deletes every task of a group and returns the count removed.
    fn delete_tasks_for_group(&mut self, group_id: GroupId) -> BoardStoreResult<u64>;

    /// Returns the tasks of a group, optionally restricted to one status.
    /// No particular order is guaranteed.
    fn tasks_in_group(
        &mut self,
        group_id: GroupId,
        status: Option<TaskStatus>,
    ) -> BoardStoreResult<Vec<Task>>;
}

/// Runs units of work atomically.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Runs `work` inside one transaction.
    ///
    /// Statements issued by `work` are committed together when it returns
    /// `Ok` and rolled back together when it returns `Err`.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a [`BoardStoreError`] converted
    /// into `E` when the transaction cannot be opened or committed.
    async fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<BoardStoreError> + Send + 'static;
}

/// Errors returned by board storage implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardStoreError {
    /// The user already holds a role in the group.
    #[error("user {user_id} already holds a role in group {group_id}")]
    DuplicateMembership {
        /// Member.
        user_id: UserId,
        /// Group.
        group_id: GroupId,
    },

    /// The position is already taken within the partition.
    #[error("position already taken in group {group_id}, status {status}")]
    DuplicatePosition {
        /// Group of the partition.
        group_id: GroupId,
        /// Status of the partition.
        status: TaskStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
