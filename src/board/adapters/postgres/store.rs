//! `PostgreSQL` unit of work for board storage.
//!
//! Each unit of work runs in one Diesel transaction on the blocking thread
//! pool. Uniqueness of memberships and task positions is enforced by unique
//! indexes; violations are mapped to their dedicated error variants by
//! constraint name so callers can tell them apart from other failures.

use super::{
    models::{
        GroupRow, MembershipRow, NewGroupRow, NewMembershipRow, NewTaskRow, TaskChangeset, TaskRow,
    },
    schema::{group_memberships, task_groups, tasks},
};
use crate::board::{
    domain::{
        Group, GroupId, GroupName, Membership, MembershipId, NewGroup, NewMembership, NewTask,
        PersistedGroupData, PersistedMembershipData, PersistedTaskData, PositionKey, Role, Task,
        TaskId, TaskStatus, TaskTitle, UserId,
    },
    ports::{BoardStoreError, BoardStoreResult, BoardTransaction, UnitOfWork},
};
use crate::config::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

const MEMBERSHIP_UNIQUE_CONSTRAINT: &str = "uq_group_memberships_user_group";
const POSITION_UNIQUE_CONSTRAINT: &str = "uq_tasks_group_status_position";

/// `PostgreSQL`-backed implementation of [`UnitOfWork`].
#[derive(Debug, Clone)]
pub struct PostgresBoardStore {
    pool: PgPool,
}

impl PostgresBoardStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Reason a Diesel transaction was rolled back.
enum TransactionAbort<E> {
    Work(E),
    Database(DieselError),
}

impl<E> From<DieselError> for TransactionAbort<E> {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl<E: From<BoardStoreError>> TransactionAbort<E> {
    fn into_error(self) -> E {
        match self {
            Self::Work(err) => err,
            Self::Database(err) => E::from(BoardStoreError::persistence(err)),
        }
    }
}

#[async_trait]
impl UnitOfWork for PostgresBoardStore {
    async fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<BoardStoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut pooled = pool
                .get()
                .map_err(|err| E::from(BoardStoreError::persistence(err)))?;
            let connection: &mut PgConnection = &mut pooled;
            connection
                .transaction::<T, TransactionAbort<E>, _>(|tx_conn| {
                    let mut transaction = PgBoardTransaction {
                        connection: tx_conn,
                    };
                    work(&mut transaction).map_err(TransactionAbort::Work)
                })
                .map_err(TransactionAbort::into_error)
        })
        .await
        .map_err(|err| E::from(BoardStoreError::persistence(err)))?
    }
}

struct PgBoardTransaction<'a> {
    connection: &'a mut PgConnection,
}

fn is_unique_violation_of(info: &dyn DatabaseErrorInformation, constraint: &str) -> bool {
    info.constraint_name().is_some_and(|name| name == constraint)
}

fn affected(rows: usize) -> BoardStoreResult<u64> {
    u64::try_from(rows).map_err(BoardStoreError::persistence)
}

impl BoardTransaction for PgBoardTransaction<'_> {
    fn insert_group(&mut self, group: &NewGroup) -> BoardStoreResult<Group> {
        let new_row = NewGroupRow {
            name: group.name().as_str().to_owned(),
            description: group.description().to_owned(),
            created_at: group.created_at(),
            updated_at: group.created_at(),
        };
        let row = diesel::insert_into(task_groups::table)
            .values(&new_row)
            .returning(GroupRow::as_returning())
            .get_result::<GroupRow>(self.connection)
            .map_err(BoardStoreError::persistence)?;
        row_to_group(row)
    }

    fn find_group(&mut self, id: GroupId) -> BoardStoreResult<Option<Group>> {
        let row = task_groups::table
            .filter(task_groups::id.eq(id.value()))
            .select(GroupRow::as_select())
            .first::<GroupRow>(self.connection)
            .optional()
            .map_err(BoardStoreError::persistence)?;
        row.map(row_to_group).transpose()
    }

    fn groups_for_user(&mut self, user_id: UserId) -> BoardStoreResult<Vec<Group>> {
        let rows = task_groups::table
            .inner_join(group_memberships::table)
            .filter(group_memberships::user_id.eq(user_id.value()))
            .order(task_groups::id.asc())
            .select(GroupRow::as_select())
            .load::<GroupRow>(self.connection)
            .map_err(BoardStoreError::persistence)?;
        rows.into_iter().map(row_to_group).collect()
    }

    fn delete_group(&mut self, id: GroupId) -> BoardStoreResult<u64> {
        let rows = diesel::delete(task_groups::table.filter(task_groups::id.eq(id.value())))
            .execute(self.connection)
            .map_err(BoardStoreError::persistence)?;
        affected(rows)
    }

    fn insert_membership(&mut self, membership: &NewMembership) -> BoardStoreResult<Membership> {
        let user_id = membership.user_id();
        let group_id = membership.group_id();
        let new_row = NewMembershipRow {
            user_id: user_id.value(),
            group_id: group_id.value(),
            role: membership.role().as_str().to_owned(),
            created_at: membership.created_at(),
        };
        let row = diesel::insert_into(group_memberships::table)
            .values(&new_row)
            .returning(MembershipRow::as_returning())
            .get_result::<MembershipRow>(self.connection)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                    if is_unique_violation_of(info.as_ref(), MEMBERSHIP_UNIQUE_CONSTRAINT) =>
                {
                    BoardStoreError::DuplicateMembership { user_id, group_id }
                }
                _ => BoardStoreError::persistence(err),
            })?;
        row_to_membership(row)
    }

    fn find_membership(
        &mut self,
        user_id: UserId,
        group_id: GroupId,
    ) -> BoardStoreResult<Option<Membership>> {
        let row = group_memberships::table
            .filter(group_memberships::user_id.eq(user_id.value()))
            .filter(group_memberships::group_id.eq(group_id.value()))
            .select(MembershipRow::as_select())
            .first::<MembershipRow>(self.connection)
            .optional()
            .map_err(BoardStoreError::persistence)?;
        row.map(row_to_membership).transpose()
    }

    fn delete_memberships_for_group(&mut self, group_id: GroupId) -> BoardStoreResult<u64> {
        let rows = diesel::delete(
            group_memberships::table.filter(group_memberships::group_id.eq(group_id.value())),
        )
        .execute(self.connection)
        .map_err(BoardStoreError::persistence)?;
        affected(rows)
    }

    fn insert_task(&mut self, task: &NewTask) -> BoardStoreResult<Task> {
        let group_id = task.group_id();
        let status = task.status();
        let new_row = NewTaskRow {
            group_id: group_id.value(),
            author_id: task.author_id().value(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            status: status.as_str().to_owned(),
            position_key: task.position_key().as_str().to_owned(),
            created_at: task.created_at(),
            updated_at: task.created_at(),
        };
        let row = diesel::insert_into(tasks::table)
            .values(&new_row)
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(self.connection)
            .map_err(|err| map_position_violation(err, group_id, status))?;
        row_to_task(row)
    }

    fn find_task(&mut self, group_id: GroupId, task_id: TaskId) -> BoardStoreResult<Option<Task>> {
        let row = tasks::table
            .filter(tasks::id.eq(task_id.value()))
            .filter(tasks::group_id.eq(group_id.value()))
            .select(TaskRow::as_select())
            .first::<TaskRow>(self.connection)
            .optional()
            .map_err(BoardStoreError::persistence)?;
        row.map(row_to_task).transpose()
    }

    fn find_task_at(
        &mut self,
        group_id: GroupId,
        status: TaskStatus,
        position_key: &PositionKey,
    ) -> BoardStoreResult<Option<Task>> {
        let row = tasks::table
            .filter(tasks::group_id.eq(group_id.value()))
            .filter(tasks::status.eq(status.as_str()))
            .filter(tasks::position_key.eq(position_key.as_str()))
            .select(TaskRow::as_select())
            .first::<TaskRow>(self.connection)
            .optional()
            .map_err(BoardStoreError::persistence)?;
        row.map(row_to_task).transpose()
    }

    fn update_task(&mut self, task: &Task) -> BoardStoreResult<u64> {
        let group_id = task.group_id();
        let status = task.status();
        let changes = TaskChangeset {
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            status: status.as_str().to_owned(),
            position_key: task.position_key().as_str().to_owned(),
            updated_at: task.updated_at(),
        };
        let rows = diesel::update(
            tasks::table
                .filter(tasks::id.eq(task.id().value()))
                .filter(tasks::group_id.eq(group_id.value())),
        )
        .set(&changes)
        .execute(self.connection)
        .map_err(|err| map_position_violation(err, group_id, status))?;
        affected(rows)
    }

    fn delete_task(&mut self, group_id: GroupId, task_id: TaskId) -> BoardStoreResult<u64> {
        let rows = diesel::delete(
            tasks::table
                .filter(tasks::id.eq(task_id.value()))
                .filter(tasks::group_id.eq(group_id.value())),
        )
        .execute(self.connection)
        .map_err(BoardStoreError::persistence)?;
        affected(rows)
    }

    fn delete_tasks_for_group(&mut self, group_id: GroupId) -> BoardStoreResult<u64> {
        let rows = diesel::delete(tasks::table.filter(tasks::group_id.eq(group_id.value())))
            .execute(self.connection)
            .map_err(BoardStoreError::persistence)?;
        affected(rows)
    }

    fn tasks_in_group(
        &mut self,
        group_id: GroupId,
        status: Option<TaskStatus>,
    ) -> BoardStoreResult<Vec<Task>> {
        let mut query = tasks::table
            .filter(tasks::group_id.eq(group_id.value()))
            .select(TaskRow::as_select())
            .into_boxed();
        if let Some(wanted) = status {
            query = query.filter(tasks::status.eq(wanted.as_str()));
        }
        let rows = query
            .load::<TaskRow>(self.connection)
            .map_err(BoardStoreError::persistence)?;
        rows.into_iter().map(row_to_task).collect()
    }
}

fn map_position_violation(
    err: DieselError,
    group_id: GroupId,
    status: TaskStatus,
) -> BoardStoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_unique_violation_of(info.as_ref(), POSITION_UNIQUE_CONSTRAINT) =>
        {
            BoardStoreError::DuplicatePosition { group_id, status }
        }
        _ => BoardStoreError::persistence(err),
    }
}

fn row_to_group(row: GroupRow) -> BoardStoreResult<Group> {
    let name = GroupName::new(row.name).map_err(BoardStoreError::persistence)?;
    Ok(Group::from_persisted(PersistedGroupData {
        id: GroupId::new(row.id),
        name,
        description: row.description,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_membership(row: MembershipRow) -> BoardStoreResult<Membership> {
    let role = Role::try_from(row.role.as_str()).map_err(BoardStoreError::persistence)?;
    Ok(Membership::from_persisted(PersistedMembershipData {
        id: MembershipId::new(row.id),
        user_id: UserId::new(row.user_id),
        group_id: GroupId::new(row.group_id),
        role,
        created_at: row.created_at,
    }))
}

fn row_to_task(row: TaskRow) -> BoardStoreResult<Task> {
    let TaskRow {
        id,
        group_id,
        author_id,
        title: persisted_title,
        description,
        status: persisted_status,
        position_key: persisted_key,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(BoardStoreError::persistence)?;
    let status =
        TaskStatus::try_from(persisted_status.as_str()).map_err(BoardStoreError::persistence)?;
    let position_key = PositionKey::new(persisted_key).map_err(BoardStoreError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        group_id: GroupId::new(group_id),
        author_id: UserId::new(author_id),
        title,
        description,
        status,
        position_key,
        created_at,
        updated_at,
    }))
}
