//! Groups: the unit of membership and task ownership.

use super::{BoardDomainError, GroupId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, trimmed group name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupName(String);

impl GroupName {
    /// Maximum length in characters, matching `task_groups.name`.
    pub const MAX_LEN: usize = 255;

    /// Creates a validated group name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyGroupName`] when the value is blank
    /// and [`BoardDomainError::GroupNameTooLong`] when the trimmed value
    /// exceeds [`Self::MAX_LEN`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyGroupName);
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(BoardDomainError::GroupNameTooLong { max: Self::MAX_LEN });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A group that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    name: GroupName,
    description: String,
    created_at: DateTime<Utc>,
}

impl NewGroup {
    /// Creates a group record.
    #[must_use]
    pub fn new(name: GroupName, description: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            name,
            description: description.into(),
            created_at,
        }
    }

    /// Returns the group name.
    #[must_use]
    pub const fn name(&self) -> &GroupName {
        &self.name
    }

    /// Returns the free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches the storage-assigned identifier.
    #[must_use]
    pub fn into_group(self, id: GroupId) -> Group {
        Group {
            id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// A stored group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: GroupName,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedGroupData {
    /// Persisted identifier.
    pub id: GroupId,
    /// Persisted name.
    pub name: GroupName,
    /// Persisted description.
    pub description: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Reconstructs a group from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedGroupData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the group identifier.
    #[must_use]
    pub const fn id(&self) -> GroupId {
        self.id
    }

    /// Returns the group name.
    #[must_use]
    pub const fn name(&self) -> &GroupName {
        &self.name
    }

    /// Returns the free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
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
}
