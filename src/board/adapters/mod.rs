//! Storage adapters for the board [`UnitOfWork`] port.
//!
//! - [`memory::InMemoryBoardStore`]: serialized in-memory transactions for
//!   tests, with fault injection for exercising rollback
//! - [`postgres::PostgresBoardStore`]: `PostgreSQL` transactions using Diesel
//!   ORM, with uniqueness enforced by unique indexes
//!
//! [`UnitOfWork`]: crate::board::ports::UnitOfWork

pub mod memory;
pub mod postgres;
