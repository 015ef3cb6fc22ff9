//! Then steps for board lifecycle BDD scenarios.

use super::world::{BoardWorld, run_async, status, subject};
use rstest_bdd_macros::then;

#[then(r#""{viewer}" sees "{titles}" in "{lane}""#)]
fn sees_titles(
    world: &BoardWorld,
    viewer: String,
    titles: String,
    lane: String,
) -> Result<(), eyre::Report> {
    let group_id = world.group()?.id();
    let listed = run_async(world.api.list_tasks(
        &subject(&viewer),
        group_id,
        Some(status(&lane)?),
    ))
    .map_err(|err| eyre::eyre!("listing failed: {err}"))?;

    let actual: Vec<&str> = listed.iter().map(|task| task.title().as_str()).collect();
    let expected: Vec<&str> = titles
        .split(',')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .collect();
    if actual != expected {
        return Err(eyre::eyre!("expected {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the last request is rejected as "{kind}""#)]
fn rejected_as(world: &BoardWorld, kind: String) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no request was made"))?;
    match outcome {
        Err(err) if err.rejection().as_str() == kind => Ok(()),
        Err(err) => Err(eyre::eyre!(
            "expected rejection {kind}, got {} ({err})",
            err.rejection()
        )),
        Ok(()) => Err(eyre::eyre!("expected rejection {kind}, request succeeded")),
    }
}

#[then("the last request succeeds")]
fn last_request_succeeds(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_outcome.as_ref() {
        Some(Ok(())) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected success, got {err}")),
        None => Err(eyre::eyre!("no request was made")),
    }
}

#[then("the group is not found")]
fn group_not_found(world: &BoardWorld) -> Result<(), eyre::Report> {
    let group_id = world.group()?.id();
    match run_async(world.api.groups().get(group_id)) {
        Err(err) if err.is_not_found() => Ok(()),
        other => Err(eyre::eyre!("expected group not found, got {other:?}")),
    }
}

#[then(r#"the task "{title}" is not found"#)]
fn task_not_found(world: &BoardWorld, title: String) -> Result<(), eyre::Report> {
    let group_id = world.group()?.id();
    let task = world
        .tasks
        .get(&title)
        .ok_or_else(|| eyre::eyre!("task {title} was never created"))?;
    match run_async(world.api.tasks().get(group_id, task.id())) {
        Err(err) if err.is_not_found() => Ok(()),
        other => Err(eyre::eyre!("expected task not found, got {other:?}")),
    }
}
