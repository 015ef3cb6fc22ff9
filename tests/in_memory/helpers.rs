//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    api::BoardApi,
    board::{
        adapters::memory::InMemoryBoardStore,
        domain::{Group, Task, TaskStatus, UserId},
        services::{
            CreateGroupRequest, CreateTaskRequest, GroupLifecycleService, TaskLifecycleService,
        },
    },
    identity::{
        adapters::memory::{InMemoryUserRepository, StaticTokenVerifier},
        services::{IdentityResolver, RegisterUserRequest, Subject},
    },
};

/// Boundary facade wired to in-memory adapters.
pub type TestApi =
    BoardApi<InMemoryUserRepository, StaticTokenVerifier, InMemoryBoardStore, DefaultClock>;

/// Group service wired to the in-memory store.
pub type TestGroups = GroupLifecycleService<InMemoryBoardStore, DefaultClock>;

/// Task service wired to the in-memory store.
pub type TestTasks = TaskLifecycleService<InMemoryBoardStore, DefaultClock>;

/// Services sharing one in-memory store.
pub struct Services {
    pub store: Arc<InMemoryBoardStore>,
    pub groups: Arc<TestGroups>,
    pub tasks: Arc<TestTasks>,
}

/// Provides group and task services over a fresh store.
#[fixture]
pub fn services() -> Services {
    let store = Arc::new(InMemoryBoardStore::new());
    let clock = Arc::new(DefaultClock);
    Services {
        groups: Arc::new(GroupLifecycleService::new(
            Arc::clone(&store),
            Arc::clone(&clock),
        )),
        tasks: Arc::new(TaskLifecycleService::new(Arc::clone(&store), clock)),
        store,
    }
}

/// Provides a facade whose verifier knows a token for each of `alice`,
/// `bob` and `carol`. No user is registered yet.
#[fixture]
pub fn api() -> TestApi {
    let verifier = StaticTokenVerifier::new()
        .with_token("token-alice", "alice")
        .with_token("token-bob", "bob")
        .with_token("token-carol", "carol");
    let clock = Arc::new(DefaultClock);
    let identity = IdentityResolver::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(verifier),
        Arc::clone(&clock),
    );
    BoardApi::new(identity, Arc::new(InMemoryBoardStore::new()), clock)
}

/// Registers `name` and returns its identifier together with its subject.
pub async fn register(api: &TestApi, name: &str) -> (UserId, Subject) {
    let user = api
        .identity()
        .register(RegisterUserRequest::new(name, name, format!("hash-{name}")))
        .await
        .expect("registration should succeed");
    (user.id(), Subject::verified(name))
}

/// Creates a group owned by `owner`.
pub async fn group_owned_by(groups: &TestGroups, owner: UserId, name: &str) -> Group {
    groups
        .create(owner, CreateGroupRequest::new(name))
        .await
        .expect("group creation should succeed")
}

/// Creates a task in `status` at `key`.
pub async fn task_at(
    tasks: &TestTasks,
    author: UserId,
    group: &Group,
    status: TaskStatus,
    key: &str,
) -> Task {
    tasks
        .create(
            author,
            group.id(),
            CreateTaskRequest::new(format!("task {key}"), status, key),
        )
        .await
        .expect("task creation should succeed")
}

/// Returns the titles of `tasks` in order.
pub fn titles<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<String> {
    tasks
        .into_iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}
