//! Position validation and ordered listing of tasks.
//!
//! Position keys are opaque strings chosen by clients and compared bytewise.
//! The engine never generates, rebalances or renumbers keys: a collision is
//! reported back to the caller, who picks another key.

use crate::board::{
    domain::{GroupId, PositionKey, Task, TaskStatus},
    ports::{BoardStoreError, BoardStoreResult, BoardTransaction},
};
use tracing::debug;

/// Tasks of one group in board order.
///
/// Within a status, tasks are sorted by ascending position key. Statuses
/// appear in the fixed order `TO_DO`, `IN_PROGRESS`, `DONE`, `ON_HOLD`. The
/// snapshot is finite and may be iterated any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedTasks {
    tasks: Vec<Task>,
}

impl OrderedTasks {
    fn from_unordered(mut tasks: Vec<Task>) -> Self {
        tasks.sort_by(|left, right| {
            left.status()
                .cmp(&right.status())
                .then_with(|| left.position_key().cmp(right.position_key()))
        });
        Self { tasks }
    }

    /// Returns an iterator over the tasks in board order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Returns the number of tasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when there are no tasks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the tasks as a vector in board order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Task> {
        self.tasks
    }
}

impl IntoIterator for OrderedTasks {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedTasks {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// Validates task positions and produces ordered listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskOrderingEngine;

impl TaskOrderingEngine {
    /// Creates an ordering engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks that no task occupies `(group_id, status, position_key)`.
    ///
    /// The storage uniqueness constraint still backs the later insert, so a
    /// concurrent writer that slips in between fails at write time with the
    /// same error.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::DuplicatePosition`] when the position is
    /// taken, or a persistence error from the lookup.
    pub fn validate_insert(
        self,
        tx: &mut dyn BoardTransaction,
        group_id: GroupId,
        status: TaskStatus,
        position_key: &PositionKey,
    ) -> BoardStoreResult<()> {
        match tx.find_task_at(group_id, status, position_key)? {
            Some(holder) => Err(conflict(group_id, status, position_key, &holder)),
            None => Ok(()),
        }
    }

    /// Checks that `task` may move to `(status, position_key)`.
    ///
    /// Nothing is checked when neither the status nor the key changes. The
    /// task itself never counts as a conflict.
    ///
    /// # Errors
    ///
    /// See [`Self::validate_insert`].
    pub fn validate_move(
        self,
        tx: &mut dyn BoardTransaction,
        task: &Task,
        status: TaskStatus,
        position_key: &PositionKey,
    ) -> BoardStoreResult<()> {
        if task.status() == status && task.position_key() == position_key {
            return Ok(());
        }
        let group_id = task.group_id();
        match tx.find_task_at(group_id, status, position_key)? {
            Some(holder) if holder.id() != task.id() => {
                Err(conflict(group_id, status, position_key, &holder))
            }
            _ => Ok(()),
        }
    }

    /// Lists the tasks of a group in board order, optionally restricted to
    /// one status.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the tasks cannot be loaded.
    pub fn list_ordered(
        self,
        tx: &mut dyn BoardTransaction,
        group_id: GroupId,
        status: Option<TaskStatus>,
    ) -> BoardStoreResult<OrderedTasks> {
        let tasks = tx.tasks_in_group(group_id, status)?;
        Ok(OrderedTasks::from_unordered(tasks))
    }
}

fn conflict(
    group_id: GroupId,
    status: TaskStatus,
    position_key: &PositionKey,
    holder: &Task,
) -> BoardStoreError {
    debug!(
        group_id = group_id.value(),
        status = status.as_str(),
        position_key = position_key.as_str(),
        holder = holder.id().value(),
        "position already taken"
    );
    BoardStoreError::DuplicatePosition { group_id, status }
}
