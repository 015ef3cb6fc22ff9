//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Display nickname.
    pub nickname: String,
    /// Opaque credential hash.
    pub credential_hash: String,
    /// Signup timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Login name.
    pub username: String,
    /// Display nickname.
    pub nickname: String,
    /// Opaque credential hash.
    pub credential_hash: String,
    /// Signup timestamp.
    pub created_at: DateTime<Utc>,
}
