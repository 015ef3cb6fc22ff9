//! Diesel schema for user identity persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Storage-assigned identifier, never reused.
        id -> Int8,
        /// Unique login name.
        #[max_length = 64]
        username -> Varchar,
        /// Display nickname.
        #[max_length = 128]
        nickname -> Varchar,
        /// Opaque credential hash.
        credential_hash -> Text,
        /// Signup timestamp.
        created_at -> Timestamptz,
    }
}
