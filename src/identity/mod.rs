//! User identity for the task board.
//!
//! Maps an authenticated subject (a username produced by an external
//! credential verifier) to a stable numeric user identifier. The module
//! follows the same hexagonal split as the board context:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The identity resolver in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
