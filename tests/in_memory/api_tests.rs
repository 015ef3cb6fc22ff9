//! Boundary behaviour of the request facade.

use super::helpers::{TestApi, api, register, titles};
use rstest::rstest;
use taskboard::{
    api::{ApiError, Rejection},
    board::{
        domain::{GroupId, Role, TaskId, TaskStatus, UserId},
        services::{CreateGroupRequest, CreateTaskRequest, UpdateTaskRequest},
    },
    identity::services::{RegisterUserRequest, Subject},
};

fn rejection_of<T: std::fmt::Debug>(result: Result<T, ApiError>) -> Rejection {
    result.expect_err("request should be rejected").rejection()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn anonymous_callers_are_forbidden(api: TestApi) {
    let result = api
        .create_group(&Subject::Anonymous, CreateGroupRequest::new("Nope"))
        .await;
    assert_eq!(rejection_of(result), Rejection::Forbidden);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn verified_but_unregistered_callers_are_unauthorized(api: TestApi) {
    let result = api.list_groups(&Subject::verified("mallory")).await;
    assert_eq!(rejection_of(result), Rejection::Unauthorized);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tokens_resolve_to_registered_users(api: TestApi) {
    let (alice_id, _) = register(&api, "alice").await;

    let resolved = api
        .identity()
        .resolve_token(Some("token-alice"))
        .await
        .expect("token resolves");

    assert_eq!(resolved, alice_id);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_is_a_bad_request(api: TestApi) {
    register(&api, "alice").await;

    let result = api
        .identity()
        .register(RegisterUserRequest::new("alice", "Other Alice", "hash"))
        .await
        .map_err(ApiError::from);

    assert_eq!(rejection_of(result), Rejection::BadRequest);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn both_authorization_failures_collapse_to_access_denied(api: TestApi) {
    let (_, alice) = register(&api, "alice").await;
    let (bob_id, bob) = register(&api, "bob").await;
    let (_, carol) = register(&api, "carol").await;
    let group = api
        .create_group(&alice, CreateGroupRequest::new("Launch"))
        .await
        .expect("create group");
    api.add_member(&alice, group.id(), bob_id, Role::Viewer)
        .await
        .expect("add viewer");

    let not_member = api
        .create_task(
            &carol,
            group.id(),
            CreateTaskRequest::new("x", TaskStatus::ToDo, "a"),
        )
        .await;
    let too_low = api
        .create_task(
            &bob,
            group.id(),
            CreateTaskRequest::new("x", TaskStatus::ToDo, "a"),
        )
        .await;

    assert_eq!(rejection_of(not_member), Rejection::AccessDenied);
    assert_eq!(rejection_of(too_low), Rejection::AccessDenied);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn adding_an_unregistered_user_is_not_found(api: TestApi) {
    let (_, alice) = register(&api, "alice").await;
    let group = api
        .create_group(&alice, CreateGroupRequest::new("Launch"))
        .await
        .expect("create group");

    let result = api
        .add_member(&alice, group.id(), UserId::new(999), Role::Member)
        .await;

    assert!(matches!(result, Err(ApiError::UnknownUser(id)) if id == UserId::new(999)));
    assert_eq!(rejection_of(result), Rejection::NotFound);
}

#[rstest]
#[case(Role::Member)]
#[case(Role::Viewer)]
#[tokio::test(flavor = "multi_thread")]
async fn second_membership_is_a_bad_request(api: TestApi, #[case] role: Role) {
    let (_, alice) = register(&api, "alice").await;
    let (bob_id, _) = register(&api, "bob").await;
    let group = api
        .create_group(&alice, CreateGroupRequest::new("Launch"))
        .await
        .expect("create group");
    api.add_member(&alice, group.id(), bob_id, Role::Member)
        .await
        .expect("first membership");

    let result = api.add_member(&alice, group.id(), bob_id, role).await;

    assert_eq!(rejection_of(result), Rejection::BadRequest);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn validation_and_collisions_are_bad_requests(api: TestApi) {
    let (_, alice) = register(&api, "alice").await;
    let group = api
        .create_group(&alice, CreateGroupRequest::new("Launch"))
        .await
        .expect("create group");
    let task = api
        .create_task(
            &alice,
            group.id(),
            CreateTaskRequest::new("First", TaskStatus::ToDo, "m"),
        )
        .await
        .expect("create task");

    let blank_title = api
        .create_task(
            &alice,
            group.id(),
            CreateTaskRequest::new("  ", TaskStatus::ToDo, "n"),
        )
        .await;
    let empty_key = api
        .update_task(
            &alice,
            group.id(),
            task.id(),
            UpdateTaskRequest::new("First", TaskStatus::ToDo, ""),
        )
        .await;
    let collision = api
        .create_task(
            &alice,
            group.id(),
            CreateTaskRequest::new("Second", TaskStatus::ToDo, "m"),
        )
        .await;

    assert_eq!(rejection_of(blank_title), Rejection::BadRequest);
    assert_eq!(rejection_of(empty_key), Rejection::BadRequest);
    assert_eq!(rejection_of(collision), Rejection::BadRequest);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn values_the_store_cannot_hold_are_bad_requests(api: TestApi) {
    let (_, alice) = register(&api, "alice").await;
    let group = api
        .create_group(&alice, CreateGroupRequest::new("Limits"))
        .await
        .expect("create group");

    let long_name = api
        .create_group(&alice, CreateGroupRequest::new("g".repeat(256)))
        .await;
    let long_title = api
        .create_task(
            &alice,
            group.id(),
            CreateTaskRequest::new("t".repeat(256), TaskStatus::ToDo, "a"),
        )
        .await;
    let nul_key = api
        .create_task(
            &alice,
            group.id(),
            CreateTaskRequest::new("Nul", TaskStatus::ToDo, "a\0b"),
        )
        .await;

    assert_eq!(rejection_of(long_name), Rejection::BadRequest);
    assert_eq!(rejection_of(long_title), Rejection::BadRequest);
    assert_eq!(rejection_of(nul_key), Rejection::BadRequest);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_see_not_found_for_missing_resources(api: TestApi) {
    let (_, alice) = register(&api, "alice").await;
    let group = api
        .create_group(&alice, CreateGroupRequest::new("Launch"))
        .await
        .expect("create group");

    let missing_task = api.get_task(&alice, group.id(), TaskId::new(77)).await;
    let missing_group = api.get_group(&alice, GroupId::new(999)).await;

    assert_eq!(rejection_of(missing_task), Rejection::NotFound);
    // No membership can exist in a group that does not exist.
    assert_eq!(rejection_of(missing_group), Rejection::AccessDenied);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_walkthrough_matches_board_order(api: TestApi) {
    let (_, alice) = register(&api, "alice").await;
    let (_, bob) = register(&api, "bob").await;
    let group = api
        .create_group(&alice, CreateGroupRequest::new("G"))
        .await
        .expect("create group");
    let t1 = api
        .create_task(
            &alice,
            group.id(),
            CreateTaskRequest::new("T1", TaskStatus::ToDo, "m"),
        )
        .await
        .expect("create T1");
    api.create_task(
        &alice,
        group.id(),
        CreateTaskRequest::new("T2", TaskStatus::ToDo, "a"),
    )
    .await
    .expect("create T2");

    let lane = api
        .list_tasks(&alice, group.id(), Some(TaskStatus::ToDo))
        .await
        .expect("list TO_DO");
    assert_eq!(titles(&lane), vec!["T2", "T1"]);

    let intrusion = api
        .create_task(
            &bob,
            group.id(),
            CreateTaskRequest::new("T3", TaskStatus::ToDo, "z"),
        )
        .await;
    assert_eq!(rejection_of(intrusion), Rejection::AccessDenied);

    api.delete_group(&alice, group.id())
        .await
        .expect("owner deletes group");

    let group_lookup = api.groups().get(group.id()).await;
    let task_lookup = api.tasks().get(group.id(), t1.id()).await;
    assert!(group_lookup.is_err_and(|err| err.is_not_found()));
    assert!(task_lookup.is_err_and(|err| err.is_not_found()));
}
