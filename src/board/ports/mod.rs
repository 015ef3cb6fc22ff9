//! Port contracts for board persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod unit_of_work;

pub use unit_of_work::{BoardStoreError, BoardStoreResult, BoardTransaction, UnitOfWork};

#[cfg(test)]
pub(crate) use unit_of_work::MockBoardTransaction;
