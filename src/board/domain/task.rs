//! Task records, statuses and position-bearing changes.

use super::{BoardDomainError, GroupId, ParseTaskStatusError, PositionKey, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lane a task sits in. Each `(group, status)` pair is its own ordering
/// partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started.
    ToDo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
    /// Parked.
    OnHold,
}

impl TaskStatus {
    /// Every status in lane order.
    pub const ALL: [Self; 4] = [Self::ToDo, Self::InProgress, Self::Done, Self::OnHold];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "TO_DO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
            Self::OnHold => "ON_HOLD",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "TO_DO" => Ok(Self::ToDo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            "ON_HOLD" => Ok(Self::OnHold),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Validated, trimmed task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Maximum length in characters, matching `tasks.title`.
    pub const MAX_LEN: usize = 255;

    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the value is blank
    /// and [`BoardDomainError::TaskTitleTooLong`] when the trimmed value
    /// exceeds [`Self::MAX_LEN`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTaskTitle);
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(BoardDomainError::TaskTitleTooLong { max: Self::MAX_LEN });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    group_id: GroupId,
    author_id: UserId,
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    position_key: PositionKey,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a task record authored by `author_id`.
    #[must_use]
    pub fn new(
        group_id: GroupId,
        author_id: UserId,
        title: TaskTitle,
        description: impl Into<String>,
        status: TaskStatus,
        position_key: PositionKey,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            group_id,
            author_id,
            title,
            description: description.into(),
            status,
            position_key,
            created_at,
        }
    }

    /// Returns the owning group.
    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lane.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the position key within the lane.
    #[must_use]
    pub const fn position_key(&self) -> &PositionKey {
        &self.position_key
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches the storage-assigned identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            group_id: self.group_id,
            author_id: self.author_id,
            title: self.title,
            description: self.description,
            status: self.status,
            position_key: self.position_key,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Full replacement of a task's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: TaskTitle,
    /// New description.
    pub description: String,
    /// New lane.
    pub status: TaskStatus,
    /// New position key within the new lane.
    pub position_key: PositionKey,
}

/// A stored task. At most one exists per `(group_id, status, position_key)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    group_id: GroupId,
    author_id: UserId,
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    position_key: PositionKey,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted identifier.
    pub id: TaskId,
    /// Persisted owning group.
    pub group_id: GroupId,
    /// Persisted author.
    pub author_id: UserId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted lane.
    pub status: TaskStatus,
    /// Persisted position key.
    pub position_key: PositionKey,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            group_id: data.group_id,
            author_id: data.author_id,
            title: data.title,
            description: data.description,
            status: data.status,
            position_key: data.position_key,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning group.
    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lane.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the position key within the lane.
    #[must_use]
    pub const fn position_key(&self) -> &PositionKey {
        &self.position_key
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether applying `changes` would move the task to another
    /// position, either by changing lane or key.
    #[must_use]
    pub fn moves_with(&self, changes: &TaskChanges) -> bool {
        self.status != changes.status || self.position_key != changes.position_key
    }

    /// Replaces the mutable fields and bumps the update timestamp.
    pub fn apply(&mut self, changes: TaskChanges, updated_at: DateTime<Utc>) {
        self.title = changes.title;
        self.description = changes.description;
        self.status = changes.status;
        self.position_key = changes.position_key;
        self.updated_at = updated_at;
    }
}
