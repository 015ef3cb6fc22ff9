//! Task lifecycle: authorized creation, lookup, listing, update and deletion.

use super::{
    authorization::AuthorizationEngine,
    error::{BoardServiceError, BoardServiceResult},
    ordering::{OrderedTasks, TaskOrderingEngine},
};
use crate::board::{
    domain::{
        Capability, GroupId, NewTask, PositionKey, Task, TaskChanges, TaskId, TaskStatus,
        TaskTitle, UserId,
    },
    ports::{BoardTransaction, UnitOfWork},
};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    status: TaskStatus,
    position_key: String,
}

impl CreateTaskRequest {
    /// Creates a request with an empty description.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        status: TaskStatus,
        position_key: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status,
            position_key: position_key.into(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request payload replacing a task's mutable fields.
///
/// Updates are full replacements: an omitted description clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: String,
    description: String,
    status: TaskStatus,
    position_key: String,
}

impl UpdateTaskRequest {
    /// Creates a request with an empty description.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        status: TaskStatus,
        position_key: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status,
            position_key: position_key.into(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    fn into_changes(self) -> BoardServiceResult<TaskChanges> {
        Ok(TaskChanges {
            title: TaskTitle::new(self.title)?,
            description: self.description,
            status: self.status,
            position_key: PositionKey::new(self.position_key)?,
        })
    }
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<W, C>
where
    W: UnitOfWork,
    C: Clock + Send + Sync,
{
    store: Arc<W>,
    clock: Arc<C>,
    authorization: AuthorizationEngine,
    ordering: TaskOrderingEngine,
}

impl<W, C> TaskLifecycleService<W, C>
where
    W: UnitOfWork,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            authorization: AuthorizationEngine::new(),
            ordering: TaskOrderingEngine::new(),
        }
    }

    /// Creates a task authored by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::InvalidInput`] for an empty title or key,
    /// [`BoardServiceError::AccessDenied`] below the member role, and
    /// [`BoardServiceError::DuplicatePosition`] when the position is taken.
    pub async fn create(
        &self,
        author_id: UserId,
        group_id: GroupId,
        request: CreateTaskRequest,
    ) -> BoardServiceResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let position_key = PositionKey::new(request.position_key)?;
        let new_task = NewTask::new(
            group_id,
            author_id,
            title,
            request.description,
            request.status,
            position_key,
            self.clock.utc(),
        );

        let authorization = self.authorization;
        let ordering = self.ordering;
        self.store
            .run(move |tx| -> BoardServiceResult<Task> {
                authorization.authorize(tx, author_id, group_id, Capability::CreateTask)?;
                ordering.validate_insert(
                    tx,
                    group_id,
                    new_task.status(),
                    new_task.position_key(),
                )?;
                Ok(tx.insert_task(&new_task)?)
            })
            .await
    }

    /// Loads a task without any authorization check.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::TaskNotFound`] when no such task exists in
    /// the group.
    pub async fn get(&self, group_id: GroupId, task_id: TaskId) -> BoardServiceResult<Task> {
        self.store
            .run(move |tx| -> BoardServiceResult<Task> { load_task(tx, group_id, task_id) })
            .await
    }

    /// Loads a task on behalf of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::AccessDenied`] unless the user is a
    /// member of the group, then [`BoardServiceError::TaskNotFound`] when no
    /// such task exists in the group.
    pub async fn get_for(
        &self,
        user_id: UserId,
        group_id: GroupId,
        task_id: TaskId,
    ) -> BoardServiceResult<Task> {
        let authorization = self.authorization;
        self.store
            .run(move |tx| -> BoardServiceResult<Task> {
                authorization.authorize(tx, user_id, group_id, Capability::ListTasks)?;
                load_task(tx, group_id, task_id)
            })
            .await
    }

    /// Lists the tasks of a group in board order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::AccessDenied`] unless the user is a
    /// member of the group.
    pub async fn list(
        &self,
        user_id: UserId,
        group_id: GroupId,
        status: Option<TaskStatus>,
    ) -> BoardServiceResult<OrderedTasks> {
        let authorization = self.authorization;
        let ordering = self.ordering;
        self.store
            .run(move |tx| -> BoardServiceResult<OrderedTasks> {
                authorization.authorize(tx, user_id, group_id, Capability::ListTasks)?;
                Ok(ordering.list_ordered(tx, group_id, status)?)
            })
            .await
    }

    /// Replaces the mutable fields of a task.
    ///
    /// Checks run in this order: group membership, task existence, the
    /// own-or-any task rule, then the new position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::AccessDenied`] for non-members and for
    /// members whose role does not cover the task,
    /// [`BoardServiceError::TaskNotFound`] when the task is absent, and
    /// [`BoardServiceError::DuplicatePosition`] when the new position is taken.
    pub async fn update(
        &self,
        requester_id: UserId,
        group_id: GroupId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> BoardServiceResult<Task> {
        let changes = request.into_changes()?;
        let now = self.clock.utc();
        let authorization = self.authorization;
        let ordering = self.ordering;
        self.store
            .run(move |tx| -> BoardServiceResult<Task> {
                let mut task =
                    load_changeable_task(tx, authorization, requester_id, group_id, task_id)?;
                if task.moves_with(&changes) {
                    ordering.validate_move(tx, &task, changes.status, &changes.position_key)?;
                }
                task.apply(changes, now);
                if tx.update_task(&task)? == 0 {
                    return Err(BoardServiceError::TaskNotFound { group_id, task_id });
                }
                Ok(task)
            })
            .await
    }

    /// Deletes a task.
    ///
    /// Uses the same check order as [`Self::update`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::AccessDenied`] for non-members and for
    /// members whose role does not cover the task, and
    /// [`BoardServiceError::TaskNotFound`] when the task is absent.
    pub async fn delete(
        &self,
        requester_id: UserId,
        group_id: GroupId,
        task_id: TaskId,
    ) -> BoardServiceResult<()> {
        let authorization = self.authorization;
        self.store
            .run(move |tx| -> BoardServiceResult<()> {
                load_changeable_task(tx, authorization, requester_id, group_id, task_id)?;
                if tx.delete_task(group_id, task_id)? == 0 {
                    return Err(BoardServiceError::TaskNotFound { group_id, task_id });
                }
                Ok(())
            })
            .await
    }
}

fn load_task(
    tx: &mut dyn BoardTransaction,
    group_id: GroupId,
    task_id: TaskId,
) -> BoardServiceResult<Task> {
    tx.find_task(group_id, task_id)?
        .ok_or(BoardServiceError::TaskNotFound { group_id, task_id })
}

fn load_changeable_task(
    tx: &mut dyn BoardTransaction,
    authorization: AuthorizationEngine,
    requester_id: UserId,
    group_id: GroupId,
    task_id: TaskId,
) -> BoardServiceResult<Task> {
    authorization.authorize(tx, requester_id, group_id, Capability::ViewGroup)?;
    let task = load_task(tx, group_id, task_id)?;
    authorization.authorize_task_change(tx, requester_id, group_id, task.author_id())?;
    Ok(task)
}
