//! Groups, roles and ordered task lists.
//!
//! This module owns the two pieces of the task board that enforce invariants
//! across concurrent mutations:
//!
//! - role-based access control evaluated per `(user, group)` pair before any
//!   side effect, and
//! - client-chosen position keys that must stay unique within each
//!   `(group, status)` partition.
//!
//! Every state change runs inside one storage transaction obtained through
//! the [`ports::UnitOfWork`] port. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Authorization, ordering and lifecycle services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
