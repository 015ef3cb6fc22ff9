//! `PostgreSQL` adapters for user identity persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresUserRepository;
