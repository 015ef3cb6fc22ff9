//! Adapters for the identity ports.
//!
//! - [`memory::InMemoryUserRepository`]: thread-safe in-memory user storage
//! - [`memory::StaticTokenVerifier`]: fixed token table standing in for the
//!   external verifier in tests and local wiring
//! - [`postgres::PostgresUserRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM

pub mod memory;
pub mod postgres;
