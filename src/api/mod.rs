//! Request-facing entry points for the task board.
//!
//! [`BoardApi`] resolves the caller's [`Subject`] to a user and hands the
//! request to the group or task service. Every failure comes back as an
//! [`ApiError`] whose [`ApiError::rejection`] gives the kind a transport
//! layer maps to its own status codes.

mod error;

pub use error::{ApiError, ApiResult, Rejection};

use crate::board::{
    domain::{Group, GroupId, Membership, Role, Task, TaskId, TaskStatus, UserId},
    ports::UnitOfWork,
    services::{
        CreateGroupRequest, CreateTaskRequest, GroupDeletion, GroupLifecycleService,
        OrderedTasks, TaskLifecycleService, UpdateTaskRequest,
    },
};
use crate::identity::{
    ports::{CredentialVerifier, UserRepository},
    services::{IdentityResolver, Subject},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Boundary facade over identity resolution and the board services.
pub struct BoardApi<R, V, W, C>
where
    R: UserRepository,
    V: CredentialVerifier,
    W: UnitOfWork,
    C: Clock + Send + Sync,
{
    identity: IdentityResolver<R, V, C>,
    groups: GroupLifecycleService<W, C>,
    tasks: TaskLifecycleService<W, C>,
}

impl<R, V, W, C> BoardApi<R, V, W, C>
where
    R: UserRepository,
    V: CredentialVerifier,
    W: UnitOfWork,
    C: Clock + Send + Sync,
{
    /// Wires the facade over one board store.
    #[must_use]
    pub fn new(identity: IdentityResolver<R, V, C>, store: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            identity,
            groups: GroupLifecycleService::new(Arc::clone(&store), Arc::clone(&clock)),
            tasks: TaskLifecycleService::new(store, clock),
        }
    }

    /// Returns the identity resolver.
    #[must_use]
    pub const fn identity(&self) -> &IdentityResolver<R, V, C> {
        &self.identity
    }

    /// Returns the group service.
    #[must_use]
    pub const fn groups(&self) -> &GroupLifecycleService<W, C> {
        &self.groups
    }

    /// Returns the task service.
    #[must_use]
    pub const fn tasks(&self) -> &TaskLifecycleService<W, C> {
        &self.tasks
    }

    /// Creates a group owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the caller cannot be resolved or creation
    /// fails.
    pub async fn create_group(
        &self,
        subject: &Subject,
        request: CreateGroupRequest,
    ) -> ApiResult<Group> {
        let user_id = self.caller(subject).await?;
        Ok(self.groups.create(user_id, request).await?)
    }

    /// Lists the caller's groups.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the caller cannot be resolved or storage
    /// fails.
    pub async fn list_groups(&self, subject: &Subject) -> ApiResult<Vec<Group>> {
        let user_id = self.caller(subject).await?;
        Ok(self.groups.list_for_user(user_id).await?)
    }

    /// Loads a group the caller belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the caller cannot be resolved or is not a
    /// member.
    pub async fn get_group(&self, subject: &Subject, group_id: GroupId) -> ApiResult<Group> {
        let user_id = self.caller(subject).await?;
        Ok(self.groups.get_for(user_id, group_id).await?)
    }

    /// Deletes a group the caller owns, with all its tasks and memberships.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the caller cannot be resolved, does not own
    /// the group, or the cascade is rolled back.
    pub async fn delete_group(
        &self,
        subject: &Subject,
        group_id: GroupId,
    ) -> ApiResult<GroupDeletion> {
        let user_id = self.caller(subject).await?;
        Ok(self.groups.delete(user_id, group_id).await?)
    }

    /// Adds a registered user to a group.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnknownUser`] when `member_id` is not registered,
    /// and [`ApiError::Board`] when the caller may not add members or the
    /// user already belongs to the group.
    pub async fn add_member(
        &self,
        subject: &Subject,
        group_id: GroupId,
        member_id: UserId,
        role: Role,
    ) -> ApiResult<Membership> {
        let user_id = self.caller(subject).await?;
        if self.identity.find_by_id(member_id).await?.is_none() {
            return Err(ApiError::UnknownUser(member_id));
        }
        Ok(self
            .groups
            .add_member(user_id, group_id, member_id, role)
            .await?)
    }

    /// Creates a task authored by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the caller cannot be resolved, lacks the
    /// member role, or the position is taken.
    pub async fn create_task(
        &self,
        subject: &Subject,
        group_id: GroupId,
        request: CreateTaskRequest,
    ) -> ApiResult<Task> {
        let user_id = self.caller(subject).await?;
        Ok(self.tasks.create(user_id, group_id, request).await?)
    }

    /// Loads a task from a group the caller belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the caller cannot be resolved, is not a
    /// member, or the task does not exist.
    pub async fn get_task(
        &self,
        subject: &Subject,
        group_id: GroupId,
        task_id: TaskId,
    ) -> ApiResult<Task> {
        let user_id = self.caller(subject).await?;
        Ok(self.tasks.get_for(user_id, group_id, task_id).await?)
    }

    /// Lists a group's tasks in board order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the caller cannot be resolved or is not a
    /// member.
    pub async fn list_tasks(
        &self,
        subject: &Subject,
        group_id: GroupId,
        status: Option<TaskStatus>,
    ) -> ApiResult<OrderedTasks> {
        let user_id = self.caller(subject).await?;
        Ok(self.tasks.list(user_id, group_id, status).await?)
    }

    /// Replaces a task's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the caller cannot be resolved, may not
    /// change the task, the task does not exist, or the new position is
    /// taken.
    pub async fn update_task(
        &self,
        subject: &Subject,
        group_id: GroupId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> ApiResult<Task> {
        let user_id = self.caller(subject).await?;
        Ok(self
            .tasks
            .update(user_id, group_id, task_id, request)
            .await?)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the caller cannot be resolved, may not
    /// change the task, or the task does not exist.
    pub async fn delete_task(
        &self,
        subject: &Subject,
        group_id: GroupId,
        task_id: TaskId,
    ) -> ApiResult<()> {
        let user_id = self.caller(subject).await?;
        Ok(self.tasks.delete(user_id, group_id, task_id).await?)
    }

    async fn caller(&self, subject: &Subject) -> ApiResult<UserId> {
        let resolved = self.identity.resolve_subject(subject).await;
        if let Err(ref err) = resolved {
            debug!(error = %err, "caller could not be resolved");
        }
        Ok(resolved?)
    }
}
