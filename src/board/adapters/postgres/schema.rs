//! Diesel schema for board persistence.

diesel::table! {
    /// Groups owning memberships and tasks.
    task_groups (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Group name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Role of a user within a group; unique per `(user_id, group_id)`.
    group_memberships (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Member.
        user_id -> Int8,
        /// Group.
        group_id -> Int8,
        /// Role name.
        #[max_length = 16]
        role -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks; unique per `(group_id, status, position_key)`.
    tasks (id) {
        /// Storage-assigned identifier.
        id -> Int8,
        /// Owning group.
        group_id -> Int8,
        /// Author.
        author_id -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Lane name.
        #[max_length = 16]
        status -> Varchar,
        /// Client-chosen position key, compared bytewise.
        position_key -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(group_memberships -> task_groups (group_id));
diesel::joinable!(tasks -> task_groups (group_id));
diesel::allow_tables_to_appear_in_same_query!(task_groups, group_memberships, tasks);
