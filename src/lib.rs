//! Taskboard: role-based access control and task ordering for group task
//! boards.
//!
//! Users belong to groups with one of four roles. Tasks live in a group,
//! carry a status lane and a client-chosen position key, and are ordered by
//! that key within their lane.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`identity`]: Mapping verified subjects to user identifiers
//! - [`board`]: Groups, memberships, authorization and task ordering
//! - [`api`]: Request-facing facade and boundary error kinds
//! - [`config`]: Storage configuration from the environment

pub mod api;
pub mod board;
pub mod config;
pub mod identity;
