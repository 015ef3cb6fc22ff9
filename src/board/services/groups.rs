//! Group lifecycle: creation with an owner, membership, and cascade deletion.

use super::{
    authorization::AuthorizationEngine,
    error::{BoardServiceError, BoardServiceResult},
};
use crate::board::{
    domain::{
        BoardDomainError, Capability, Group, GroupId, GroupName, Membership, NewGroup,
        NewMembership, Role, UserId,
    },
    ports::{BoardStoreError, UnitOfWork},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Request payload for creating a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGroupRequest {
    name: String,
    description: String,
}

impl CreateGroupRequest {
    /// Creates a request with an empty description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    /// Sets the group description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Rows removed by a group deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupDeletion {
    /// Tasks removed.
    pub tasks: u64,
    /// Memberships removed.
    pub memberships: u64,
}

/// Group lifecycle orchestration service.
#[derive(Clone)]
pub struct GroupLifecycleService<W, C>
where
    W: UnitOfWork,
    C: Clock + Send + Sync,
{
    store: Arc<W>,
    clock: Arc<C>,
    authorization: AuthorizationEngine,
}

impl<W, C> GroupLifecycleService<W, C>
where
    W: UnitOfWork,
    C: Clock + Send + Sync,
{
    /// Creates a new group lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            authorization: AuthorizationEngine::new(),
        }
    }

    /// Creates a group and makes `owner_id` its owner.
    ///
    /// The group row and the owner membership are written in one
    /// transaction: either both exist afterwards or neither does.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::InvalidInput`] for an empty name and
    /// [`BoardServiceError::CreationFailed`] when either write fails.
    pub async fn create(
        &self,
        owner_id: UserId,
        request: CreateGroupRequest,
    ) -> BoardServiceResult<Group> {
        let name = GroupName::new(request.name)?;
        let now = self.clock.utc();
        let new_group = NewGroup::new(name, request.description, now);

        let group = self
            .store
            .run(move |tx| -> Result<Group, BoardStoreError> {
                let stored = tx.insert_group(&new_group)?;
                let owner = NewMembership::new(owner_id, stored.id(), Role::Owner, now);
                tx.insert_membership(&owner)?;
                Ok(stored)
            })
            .await
            .map_err(BoardServiceError::CreationFailed)?;

        info!(
            group_id = group.id().value(),
            owner_id = owner_id.value(),
            "group created"
        );
        Ok(group)
    }

    /// Lists the groups in which `user_id` holds any role, in identifier
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Store`] when the lookup fails.
    pub async fn list_for_user(&self, user_id: UserId) -> BoardServiceResult<Vec<Group>> {
        self.store
            .run(move |tx| -> BoardServiceResult<Vec<Group>> { Ok(tx.groups_for_user(user_id)?) })
            .await
    }

    /// Loads a group without any authorization check.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::GroupNotFound`] when the group does not
    /// exist.
    pub async fn get(&self, group_id: GroupId) -> BoardServiceResult<Group> {
        self.store
            .run(move |tx| -> BoardServiceResult<Group> {
                tx.find_group(group_id)?
                    .ok_or(BoardServiceError::GroupNotFound(group_id))
            })
            .await
    }

    /// Loads a group on behalf of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::AccessDenied`] unless the user is a
    /// member of the group.
    pub async fn get_for(&self, user_id: UserId, group_id: GroupId) -> BoardServiceResult<Group> {
        let authorization = self.authorization;
        self.store
            .run(move |tx| -> BoardServiceResult<Group> {
                authorization.authorize(tx, user_id, group_id, Capability::ViewGroup)?;
                tx.find_group(group_id)?
                    .ok_or(BoardServiceError::GroupNotFound(group_id))
            })
            .await
    }

    /// Adds `member_id` to the group with a non-owner role.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::InvalidInput`] when `role` is
    /// [`Role::Owner`], [`BoardServiceError::AccessDenied`] unless the
    /// requester is at least a manager, and
    /// [`BoardServiceError::DuplicateMembership`] when the user already holds
    /// a role in the group.
    pub async fn add_member(
        &self,
        requester_id: UserId,
        group_id: GroupId,
        member_id: UserId,
        role: Role,
    ) -> BoardServiceResult<Membership> {
        if role == Role::Owner {
            return Err(BoardDomainError::OwnerRoleNotAssignable.into());
        }
        let now = self.clock.utc();
        let authorization = self.authorization;
        let membership = self
            .store
            .run(move |tx| -> BoardServiceResult<Membership> {
                authorization.authorize(tx, requester_id, group_id, Capability::AddMember)?;
                Ok(tx.insert_membership(&NewMembership::new(member_id, group_id, role, now))?)
            })
            .await?;

        info!(
            group_id = group_id.value(),
            member_id = member_id.value(),
            role = role.as_str(),
            "member added"
        );
        Ok(membership)
    }

    /// Deletes a group together with its tasks and memberships.
    ///
    /// Statements run in one transaction in this order: tasks of the group,
    /// memberships of the group, the group row. A failure at any step rolls
    /// back every earlier step.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::AccessDenied`] unless `requester_id` owns
    /// the group, and [`BoardServiceError::TransactionAborted`] when any
    /// statement fails.
    pub async fn delete(
        &self,
        requester_id: UserId,
        group_id: GroupId,
    ) -> BoardServiceResult<GroupDeletion> {
        let authorization = self.authorization;
        let deletion = self
            .store
            .run(move |tx| -> BoardServiceResult<GroupDeletion> {
                authorization.authorize(tx, requester_id, group_id, Capability::DeleteGroup)?;
                let tasks = tx
                    .delete_tasks_for_group(group_id)
                    .map_err(BoardServiceError::TransactionAborted)?;
                let memberships = tx
                    .delete_memberships_for_group(group_id)
                    .map_err(BoardServiceError::TransactionAborted)?;
                let removed = tx
                    .delete_group(group_id)
                    .map_err(BoardServiceError::TransactionAborted)?;
                if removed == 0 {
                    return Err(BoardServiceError::GroupNotFound(group_id));
                }
                Ok(GroupDeletion { tasks, memberships })
            })
            .await
            .map_err(|err| match err {
                BoardServiceError::Store(store) => BoardServiceError::TransactionAborted(store),
                other => other,
            })?;

        info!(
            group_id = group_id.value(),
            requester_id = requester_id.value(),
            tasks = deletion.tasks,
            memberships = deletion.memberships,
            "group deleted"
        );
        Ok(deletion)
    }
}
