//! In-memory board storage for testing.

mod store;

pub use store::{FailPoint, InMemoryBoardStore};
