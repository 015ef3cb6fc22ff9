//! Board storage tests against an embedded `PostgreSQL` cluster.

use std::sync::Arc;

use crate::postgres::helpers::{PreparedBoard, prepared_board};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::{fixture, rstest};
use taskboard::{
    board::{
        domain::{BoardDomainError, GroupName, Role, TaskStatus, TaskTitle},
        services::{
            BoardServiceError, CreateGroupRequest, CreateTaskRequest, GroupDeletion,
            UpdateTaskRequest,
        },
    },
    identity::{
        domain::{NewUser, Username},
        ports::{UserRepository, UserRepositoryError},
    },
};
use tokio::sync::Barrier;

#[fixture]
fn board(shared_test_cluster: &'static TestCluster) -> PreparedBoard {
    prepared_board(shared_test_cluster).expect("board database setup")
}

#[rstest]
fn unique_index_rejects_second_membership(board: PreparedBoard) {
    let owner = board.user("owner").expect("register owner");
    let member = board.user("member").expect("register member");
    let group = board
        .block_on(board.groups.create(owner, CreateGroupRequest::new("Ops")))
        .expect("create group");
    board
        .block_on(
            board
                .groups
                .add_member(owner, group.id(), member, Role::Viewer),
        )
        .expect("first membership");

    let result = board.block_on(
        board
            .groups
            .add_member(owner, group.id(), member, Role::Member),
    );

    assert!(
        matches!(
            result,
            Err(BoardServiceError::DuplicateMembership { user_id, .. }) if user_id == member
        ),
        "expected DuplicateMembership, got: {result:?}"
    );
}

#[rstest]
fn concurrent_inserts_at_one_position_admit_exactly_one(board: PreparedBoard) {
    let owner = board.user("owner").expect("register owner");
    let group = board
        .block_on(board.groups.create(owner, CreateGroupRequest::new("Race")))
        .expect("create group");
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = ["left", "right"]
        .into_iter()
        .map(|title| {
            let tasks = Arc::clone(&board.tasks);
            let gate = Arc::clone(&barrier);
            let group_id = group.id();
            board.runtime.spawn(async move {
                gate.wait().await;
                tasks
                    .create(
                        owner,
                        group_id,
                        CreateTaskRequest::new(title, TaskStatus::ToDo, "m"),
                    )
                    .await
            })
        })
        .collect();

    let mut created = 0;
    let mut duplicates = 0;
    for handle in handles {
        match board.block_on(handle).expect("task join") {
            Ok(_) => created += 1,
            Err(BoardServiceError::DuplicatePosition { .. }) => duplicates += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!((created, duplicates), (1, 1));
}

#[rstest]
fn position_keys_sort_bytewise_regardless_of_locale(board: PreparedBoard) {
    let owner = board.user("owner").expect("register owner");
    let group = board
        .block_on(
            board
                .groups
                .create(owner, CreateGroupRequest::new("Collation")),
        )
        .expect("create group");
    for key in ["\u{e9}", "a", "B"] {
        board
            .block_on(board.tasks.create(
                owner,
                group.id(),
                CreateTaskRequest::new(format!("at {key}"), TaskStatus::Done, key),
            ))
            .expect("create task");
    }

    let listed = board
        .block_on(board.tasks.list(owner, group.id(), Some(TaskStatus::Done)))
        .expect("list tasks");
    let keys: Vec<&str> = listed
        .iter()
        .map(|task| task.position_key().as_str())
        .collect();

    assert_eq!(keys, vec!["B", "a", "\u{e9}"]);
}

#[rstest]
fn deleting_a_group_removes_its_rows(board: PreparedBoard) {
    let owner = board.user("owner").expect("register owner");
    let manager = board.user("manager").expect("register manager");
    let group = board
        .block_on(
            board
                .groups
                .create(owner, CreateGroupRequest::new("Temporary")),
        )
        .expect("create group");
    board
        .block_on(
            board
                .groups
                .add_member(owner, group.id(), manager, Role::Manager),
        )
        .expect("add manager");
    let task = board
        .block_on(board.tasks.create(
            manager,
            group.id(),
            CreateTaskRequest::new("Pack up", TaskStatus::InProgress, "p"),
        ))
        .expect("create task");

    let deletion = board
        .block_on(board.groups.delete(owner, group.id()))
        .expect("owner deletes group");

    assert_eq!(
        deletion,
        GroupDeletion {
            tasks: 1,
            memberships: 2
        }
    );
    assert!(matches!(
        board.block_on(board.groups.get(group.id())),
        Err(BoardServiceError::GroupNotFound(_))
    ));
    assert!(matches!(
        board.block_on(board.tasks.get(group.id(), task.id())),
        Err(BoardServiceError::TaskNotFound { .. })
    ));
    let remaining = board
        .block_on(board.groups.list_for_user(manager))
        .expect("list manager groups");
    assert!(remaining.is_empty());
}

#[rstest]
fn moving_onto_an_occupied_position_leaves_the_task_unchanged(board: PreparedBoard) {
    let owner = board.user("owner").expect("register owner");
    let group = board
        .block_on(board.groups.create(owner, CreateGroupRequest::new("Moves")))
        .expect("create group");
    let mover = board
        .block_on(board.tasks.create(
            owner,
            group.id(),
            CreateTaskRequest::new("Mover", TaskStatus::ToDo, "a"),
        ))
        .expect("create mover");
    board
        .block_on(board.tasks.create(
            owner,
            group.id(),
            CreateTaskRequest::new("Holder", TaskStatus::OnHold, "a"),
        ))
        .expect("create holder");

    let result = board.block_on(board.tasks.update(
        owner,
        group.id(),
        mover.id(),
        UpdateTaskRequest::new("Mover", TaskStatus::OnHold, "a"),
    ));

    assert!(matches!(
        result,
        Err(BoardServiceError::DuplicatePosition { status: TaskStatus::OnHold, .. })
    ));
    let unchanged = board
        .block_on(board.tasks.get(group.id(), mover.id()))
        .expect("mover still present");
    assert_eq!(unchanged.status(), TaskStatus::ToDo);
}

#[rstest]
fn longest_accepted_values_fit_their_columns(board: PreparedBoard) {
    let owner = board
        .user(&"u".repeat(Username::MAX_LEN))
        .expect("longest username is stored");
    let group = board
        .block_on(board.groups.create(
            owner,
            CreateGroupRequest::new("g".repeat(GroupName::MAX_LEN)),
        ))
        .expect("longest group name is stored");

    let stored = board
        .block_on(board.tasks.create(
            owner,
            group.id(),
            CreateTaskRequest::new("t".repeat(TaskTitle::MAX_LEN), TaskStatus::ToDo, "a"),
        ))
        .expect("longest title is stored");
    let too_long = board.block_on(board.tasks.create(
        owner,
        group.id(),
        CreateTaskRequest::new("t".repeat(TaskTitle::MAX_LEN + 1), TaskStatus::ToDo, "b"),
    ));

    assert_eq!(stored.title().as_str().chars().count(), TaskTitle::MAX_LEN);
    assert!(matches!(
        too_long,
        Err(BoardServiceError::InvalidInput(BoardDomainError::TaskTitleTooLong { .. }))
    ));
}

#[rstest]
fn usernames_are_unique(board: PreparedBoard) {
    board.user("alice").expect("first registration");
    let duplicate = NewUser::new(
        Username::new("alice").expect("valid username"),
        "Alice Again",
        "hash",
        chrono::Utc::now(),
    )
    .expect("valid user");

    let result = board.block_on(board.users.store(&duplicate));

    assert!(
        matches!(
            &result,
            Err(UserRepositoryError::DuplicateUsername(name)) if name.as_str() == "alice"
        ),
        "expected DuplicateUsername, got: {result:?}"
    );
}
