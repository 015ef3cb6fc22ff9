//! Diesel row models for board persistence.

use super::schema::{group_memberships, task_groups, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for group records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GroupRow {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Trimmed group name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for group records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_groups)]
pub struct NewGroupRow {
    /// Trimmed group name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for membership records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = group_memberships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MembershipRow {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Member user identifier.
    pub user_id: i64,
    /// Owning group identifier.
    pub group_id: i64,
    /// Stored role name, for example `MANAGER`.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for membership records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = group_memberships)]
pub struct NewMembershipRow {
    /// Member user identifier.
    pub user_id: i64,
    /// Owning group identifier.
    pub group_id: i64,
    /// Stored role name, for example `MANAGER`.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Owning group identifier.
    pub group_id: i64,
    /// Identifier of the user who created the task.
    pub author_id: i64,
    /// Trimmed task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Stored status lane, for example `IN_PROGRESS`.
    pub status: String,
    /// Client-chosen key ordering the task within its lane.
    pub position_key: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning group identifier.
    pub group_id: i64,
    /// Identifier of the user who created the task.
    pub author_id: i64,
    /// Trimmed task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Stored status lane, for example `IN_PROGRESS`.
    pub status: String,
    /// Client-chosen key ordering the task within its lane.
    pub position_key: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when a task is overwritten.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Trimmed task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Stored status lane, for example `IN_PROGRESS`.
    pub status: String,
    /// Client-chosen key ordering the task within its lane.
    pub position_key: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
