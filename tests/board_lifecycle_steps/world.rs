//! Shared world state for board lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    api::{ApiError, BoardApi},
    board::{
        adapters::memory::InMemoryBoardStore,
        domain::{Group, Task, TaskStatus},
    },
    identity::{
        adapters::memory::{InMemoryUserRepository, StaticTokenVerifier},
        domain::UserId,
        services::{IdentityResolver, Subject},
    },
};

/// Facade type used by the BDD world.
pub type TestApi =
    BoardApi<InMemoryUserRepository, StaticTokenVerifier, InMemoryBoardStore, DefaultClock>;

/// Scenario world for board lifecycle behaviour tests.
pub struct BoardWorld {
    pub api: TestApi,
    pub users: HashMap<String, UserId>,
    pub owner: Option<String>,
    pub group: Option<Group>,
    pub tasks: HashMap<String, Task>,
    pub last_outcome: Option<Result<(), ApiError>>,
}

impl BoardWorld {
    /// Creates a world with no users and no group.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let identity = IdentityResolver::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(StaticTokenVerifier::new()),
            Arc::clone(&clock),
        );
        Self {
            api: BoardApi::new(identity, Arc::new(InMemoryBoardStore::new()), clock),
            users: HashMap::new(),
            owner: None,
            group: None,
            tasks: HashMap::new(),
            last_outcome: None,
        }
    }

    /// Returns the scenario group.
    pub fn group(&self) -> Result<&Group, eyre::Report> {
        self.group
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing group in scenario world"))
    }

    /// Returns the identifier registered for `name`.
    pub fn user_id(&self, name: &str) -> Result<UserId, eyre::Report> {
        self.users
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("user {name} was never registered"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Builds the subject the request layer would hand over for `name`.
pub fn subject(name: &str) -> Subject {
    Subject::verified(name)
}

/// Parses a lane name used in feature files.
pub fn status(name: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(name).map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
