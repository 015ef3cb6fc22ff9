//! In-memory unit of work for board tests.
//!
//! Units of work are serialized behind one mutex. Each runs against a working
//! copy of the tables that replaces the published state only when the unit
//! returns `Ok`, which gives the same all-or-nothing behaviour as a database
//! transaction. Identifier sequences live outside the working copy so, as with
//! database sequences, identifiers consumed by a rolled-back unit are not
//! handed out again.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::board::{
    domain::{
        Group, GroupId, Membership, MembershipId, NewGroup, NewMembership, NewTask, PositionKey,
        Task, TaskId, TaskStatus, UserId,
    },
    ports::{BoardStoreError, BoardStoreResult, BoardTransaction, UnitOfWork},
};

/// Write statements that can be made to fail on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    /// [`BoardTransaction::insert_group`].
    InsertGroup,
    /// [`BoardTransaction::insert_membership`].
    InsertMembership,
    /// [`BoardTransaction::insert_task`].
    InsertTask,
    /// [`BoardTransaction::update_task`].
    UpdateTask,
    /// [`BoardTransaction::delete_task`].
    DeleteTask,
    /// [`BoardTransaction::delete_tasks_for_group`].
    DeleteTasksForGroup,
    /// [`BoardTransaction::delete_memberships_for_group`].
    DeleteMembershipsForGroup,
    /// [`BoardTransaction::delete_group`].
    DeleteGroup,
}

/// Thread-safe in-memory implementation of [`UnitOfWork`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    tables: BoardTables,
    sequences: IdSequences,
    fail_point: Option<FailPoint>,
}

#[derive(Debug, Clone, Default)]
struct BoardTables {
    groups: BTreeMap<GroupId, Group>,
    memberships: BTreeMap<MembershipId, Membership>,
    membership_index: HashMap<(UserId, GroupId), MembershipId>,
    tasks: BTreeMap<TaskId, Task>,
    position_index: HashMap<(GroupId, TaskStatus, PositionKey), TaskId>,
}

#[derive(Debug, Default)]
struct IdSequences {
    group: i64,
    membership: i64,
    task: i64,
}

impl InMemoryBoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later execution of `point` fail with a persistence error
    /// until [`Self::clear_fail_point`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Persistence`] if the store lock is poisoned.
    pub fn fail_on(&self, point: FailPoint) -> BoardStoreResult<()> {
        self.lock()?.fail_point = Some(point);
        Ok(())
    }

    /// Removes any configured fail point.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError::Persistence`] if the store lock is poisoned.
    pub fn clear_fail_point(&self) -> BoardStoreResult<()> {
        self.lock()?.fail_point = None;
        Ok(())
    }

    fn lock(&self) -> BoardStoreResult<std::sync::MutexGuard<'_, StoreInner>> {
        self.inner.lock().map_err(|err| {
            BoardStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn run_serialized<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> Result<T, E>,
        E: From<BoardStoreError>,
    {
        let mut guard = self.lock()?;
        let inner = &mut *guard;
        let mut working = inner.tables.clone();
        let outcome = {
            let mut transaction = MemoryTransaction {
                tables: &mut working,
                sequences: &mut inner.sequences,
                fail_point: inner.fail_point,
            };
            work(&mut transaction)
        };
        if outcome.is_ok() {
            inner.tables = working;
        }
        outcome
    }
}

#[async_trait]
impl UnitOfWork for InMemoryBoardStore {
    async fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<BoardStoreError> + Send + 'static,
    {
        self.run_serialized(work)
    }
}

struct MemoryTransaction<'a> {
    tables: &'a mut BoardTables,
    sequences: &'a mut IdSequences,
    fail_point: Option<FailPoint>,
}

impl MemoryTransaction<'_> {
    fn check(&self, point: FailPoint) -> BoardStoreResult<()> {
        if self.fail_point == Some(point) {
            return Err(BoardStoreError::persistence(std::io::Error::other(
                format!("injected failure at {point:?}"),
            )));
        }
        Ok(())
    }

    fn unindex_task(&mut self, task: &Task) {
        self.tables.position_index.remove(&(
            task.group_id(),
            task.status(),
            task.position_key().clone(),
        ));
    }
}

fn next_id(sequence: &mut i64) -> i64 {
    *sequence += 1;
    *sequence
}

fn count(removed: usize) -> u64 {
    u64::try_from(removed).unwrap_or(u64::MAX)
}

impl BoardTransaction for MemoryTransaction<'_> {
    fn insert_group(&mut self, group: &NewGroup) -> BoardStoreResult<Group> {
        self.check(FailPoint::InsertGroup)?;
        let id = GroupId::new(next_id(&mut self.sequences.group));
        let stored = group.clone().into_group(id);
        self.tables.groups.insert(id, stored.clone());
        Ok(stored)
    }

    fn find_group(&mut self, id: GroupId) -> BoardStoreResult<Option<Group>> {
        Ok(self.tables.groups.get(&id).cloned())
    }

    fn groups_for_user(&mut self, user_id: UserId) -> BoardStoreResult<Vec<Group>> {
        let mut groups: Vec<Group> = self
            .tables
            .memberships
            .values()
            .filter(|membership| membership.user_id() == user_id)
            .filter_map(|membership| self.tables.groups.get(&membership.group_id()))
            .cloned()
            .collect();
        groups.sort_by_key(Group::id);
        Ok(groups)
    }

    fn delete_group(&mut self, id: GroupId) -> BoardStoreResult<u64> {
        self.check(FailPoint::DeleteGroup)?;
        Ok(u64::from(self.tables.groups.remove(&id).is_some()))
    }

    fn insert_membership(&mut self, membership: &NewMembership) -> BoardStoreResult<Membership> {
        self.check(FailPoint::InsertMembership)?;
        let pair = (membership.user_id(), membership.group_id());
        if self.tables.membership_index.contains_key(&pair) {
            return Err(BoardStoreError::DuplicateMembership {
                user_id: membership.user_id(),
                group_id: membership.group_id(),
            });
        }
        let id = MembershipId::new(next_id(&mut self.sequences.membership));
        let stored = membership.clone().into_membership(id);
        self.tables.membership_index.insert(pair, id);
        self.tables.memberships.insert(id, stored.clone());
        Ok(stored)
    }

    fn find_membership(
        &mut self,
        user_id: UserId,
        group_id: GroupId,
    ) -> BoardStoreResult<Option<Membership>> {
        let membership = self
            .tables
            .membership_index
            .get(&(user_id, group_id))
            .and_then(|id| self.tables.memberships.get(id))
            .cloned();
        Ok(membership)
    }

    fn delete_memberships_for_group(&mut self, group_id: GroupId) -> BoardStoreResult<u64> {
        self.check(FailPoint::DeleteMembershipsForGroup)?;
        let doomed: Vec<Membership> = self
            .tables
            .memberships
            .values()
            .filter(|membership| membership.group_id() == group_id)
            .cloned()
            .collect();
        for membership in &doomed {
            self.tables.memberships.remove(&membership.id());
            self.tables
                .membership_index
                .remove(&(membership.user_id(), membership.group_id()));
        }
        Ok(count(doomed.len()))
    }

    fn insert_task(&mut self, task: &NewTask) -> BoardStoreResult<Task> {
        self.check(FailPoint::InsertTask)?;
        let position = (task.group_id(), task.status(), task.position_key().clone());
        if self.tables.position_index.contains_key(&position) {
            return Err(BoardStoreError::DuplicatePosition {
                group_id: task.group_id(),
                status: task.status(),
            });
        }
        let id = TaskId::new(next_id(&mut self.sequences.task));
        let stored = task.clone().into_task(id);
        self.tables.position_index.insert(position, id);
        self.tables.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    fn find_task(&mut self, group_id: GroupId, task_id: TaskId) -> BoardStoreResult<Option<Task>> {
        let task = self
            .tables
            .tasks
            .get(&task_id)
            .filter(|task| task.group_id() == group_id)
            .cloned();
        Ok(task)
    }

    fn find_task_at(
        &mut self,
        group_id: GroupId,
        status: TaskStatus,
        position_key: &PositionKey,
    ) -> BoardStoreResult<Option<Task>> {
        let task = self
            .tables
            .position_index
            .get(&(group_id, status, position_key.clone()))
            .and_then(|id| self.tables.tasks.get(id))
            .cloned();
        Ok(task)
    }

    fn update_task(&mut self, task: &Task) -> BoardStoreResult<u64> {
        self.check(FailPoint::UpdateTask)?;
        let Some(previous) = self
            .tables
            .tasks
            .get(&task.id())
            .filter(|stored| stored.group_id() == task.group_id())
            .cloned()
        else {
            return Ok(0);
        };

        let position = (task.group_id(), task.status(), task.position_key().clone());
        let holder = self.tables.position_index.get(&position).copied();
        if holder.is_some_and(|holder_id| holder_id != task.id()) {
            return Err(BoardStoreError::DuplicatePosition {
                group_id: task.group_id(),
                status: task.status(),
            });
        }

        self.unindex_task(&previous);
        self.tables.position_index.insert(position, task.id());
        self.tables.tasks.insert(task.id(), task.clone());
        Ok(1)
    }

    fn delete_task(&mut self, group_id: GroupId, task_id: TaskId) -> BoardStoreResult<u64> {
        self.check(FailPoint::DeleteTask)?;
        let Some(task) = self
            .tables
            .tasks
            .get(&task_id)
            .filter(|task| task.group_id() == group_id)
            .cloned()
        else {
            return Ok(0);
        };
        self.unindex_task(&task);
        self.tables.tasks.remove(&task_id);
        Ok(1)
    }

    fn delete_tasks_for_group(&mut self, group_id: GroupId) -> BoardStoreResult<u64> {
        self.check(FailPoint::DeleteTasksForGroup)?;
        let doomed: Vec<Task> = self
            .tables
            .tasks
            .values()
            .filter(|task| task.group_id() == group_id)
            .cloned()
            .collect();
        for task in &doomed {
            self.unindex_task(task);
            self.tables.tasks.remove(&task.id());
        }
        Ok(count(doomed.len()))
    }

    fn tasks_in_group(
        &mut self,
        group_id: GroupId,
        status: Option<TaskStatus>,
    ) -> BoardStoreResult<Vec<Task>> {
        let tasks = self
            .tables
            .tasks
            .values()
            .filter(|task| task.group_id() == group_id)
            .filter(|task| status.is_none_or(|wanted| task.status() == wanted))
            .cloned()
            .collect();
        Ok(tasks)
    }
}
