//! End-to-end group and task flows against the in-memory store.

use super::helpers::{Services, group_owned_by, services, task_at, titles};
use rstest::rstest;
use taskboard::board::{
    domain::{Role, TaskStatus, UserId},
    services::{BoardServiceError, UpdateTaskRequest},
};

const ALICE: UserId = UserId::new(1);
const BOB: UserId = UserId::new(2);
const CAROL: UserId = UserId::new(3);

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_lists_lanes_in_order_with_keys_ascending(services: Services) {
    let group = group_owned_by(&services.groups, ALICE, "Launch").await;
    task_at(&services.tasks, ALICE, &group, TaskStatus::Done, "b").await;
    task_at(&services.tasks, ALICE, &group, TaskStatus::ToDo, "m").await;
    task_at(&services.tasks, ALICE, &group, TaskStatus::OnHold, "a").await;
    task_at(&services.tasks, ALICE, &group, TaskStatus::ToDo, "a").await;
    task_at(&services.tasks, ALICE, &group, TaskStatus::InProgress, "x").await;

    let board = services
        .tasks
        .list(ALICE, group.id(), None)
        .await
        .expect("owner may list");

    assert_eq!(
        titles(&board),
        vec!["task a", "task m", "task x", "task b", "task a"]
    );
    let statuses: Vec<TaskStatus> = board.iter().map(|task| task.status()).collect();
    assert_eq!(
        statuses,
        vec![
            TaskStatus::ToDo,
            TaskStatus::ToDo,
            TaskStatus::InProgress,
            TaskStatus::Done,
            TaskStatus::OnHold,
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn freed_position_can_be_reused(services: Services) {
    let group = group_owned_by(&services.groups, ALICE, "Launch").await;
    let first = task_at(&services.tasks, ALICE, &group, TaskStatus::ToDo, "m").await;

    services
        .tasks
        .update(
            ALICE,
            group.id(),
            first.id(),
            UpdateTaskRequest::new("moved on", TaskStatus::InProgress, "m"),
        )
        .await
        .expect("move to another lane");
    let second = task_at(&services.tasks, ALICE, &group, TaskStatus::ToDo, "m").await;

    assert_ne!(first.id(), second.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn membership_grants_access_only_to_its_group(services: Services) {
    let launch = group_owned_by(&services.groups, ALICE, "Launch").await;
    let retro = group_owned_by(&services.groups, BOB, "Retro").await;
    services
        .groups
        .add_member(ALICE, launch.id(), CAROL, Role::Member)
        .await
        .expect("owner adds carol");

    let allowed = services.tasks.list(CAROL, launch.id(), None).await;
    let denied = services.tasks.list(CAROL, retro.id(), None).await;

    assert!(allowed.is_ok());
    assert!(matches!(denied, Err(BoardServiceError::AccessDenied(_))));

    let carol_groups = services
        .groups
        .list_for_user(CAROL)
        .await
        .expect("list carol's groups");
    assert_eq!(carol_groups, vec![launch]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn managers_may_rearrange_any_task(services: Services) {
    let group = group_owned_by(&services.groups, ALICE, "Launch").await;
    services
        .groups
        .add_member(ALICE, group.id(), BOB, Role::Manager)
        .await
        .expect("owner adds manager");
    services
        .groups
        .add_member(BOB, group.id(), CAROL, Role::Member)
        .await
        .expect("manager adds member");
    let carols = task_at(&services.tasks, CAROL, &group, TaskStatus::ToDo, "m").await;
    task_at(&services.tasks, ALICE, &group, TaskStatus::ToDo, "c").await;

    services
        .tasks
        .update(
            BOB,
            group.id(),
            carols.id(),
            UpdateTaskRequest::new("task m", TaskStatus::ToDo, "a"),
        )
        .await
        .expect("manager may move any task");

    let lane = services
        .tasks
        .list(CAROL, group.id(), Some(TaskStatus::ToDo))
        .await
        .expect("member may list");
    let keys: Vec<&str> = lane.iter().map(|task| task.position_key().as_str()).collect();
    assert_eq!(keys, vec!["a", "c"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_one_group_leaves_others_alone(services: Services) {
    let doomed = group_owned_by(&services.groups, ALICE, "Doomed").await;
    let kept = group_owned_by(&services.groups, ALICE, "Kept").await;
    task_at(&services.tasks, ALICE, &doomed, TaskStatus::ToDo, "m").await;
    let survivor = task_at(&services.tasks, ALICE, &kept, TaskStatus::ToDo, "m").await;

    services
        .groups
        .delete(ALICE, doomed.id())
        .await
        .expect("owner deletes group");

    let fetched = services
        .tasks
        .get(kept.id(), survivor.id())
        .await
        .expect("other group's task survives");
    assert_eq!(fetched, survivor);
    let remaining = services
        .groups
        .list_for_user(ALICE)
        .await
        .expect("list groups");
    assert_eq!(remaining, vec![kept]);
}
