//! Application services for groups and tasks.
//!
//! Every operation runs as one unit of work. Authorization, position checks
//! and writes all go through the same transaction.

mod authorization;
mod error;
mod groups;
mod ordering;
mod tasks;

pub use authorization::{AuthorizationEngine, evaluate, task_change_capability};
pub use error::{AuthorizationError, BoardServiceError, BoardServiceResult};
pub use groups::{CreateGroupRequest, GroupDeletion, GroupLifecycleService};
pub use ordering::{OrderedTasks, TaskOrderingEngine};
pub use tasks::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest};
