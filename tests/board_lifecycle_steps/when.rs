//! When steps for board lifecycle BDD scenarios.

use super::world::{BoardWorld, run_async, status, subject};
use rstest_bdd_macros::when;
use taskboard::board::services::CreateTaskRequest;

#[when(r#""{author}" creates task "{title}" in "{lane}" at position "{key}""#)]
fn create_task(
    world: &mut BoardWorld,
    author: String,
    title: String,
    lane: String,
    key: String,
) -> Result<(), eyre::Report> {
    let group_id = world.group()?.id();
    let request = CreateTaskRequest::new(title.as_str(), status(&lane)?, key);
    match run_async(world.api.create_task(&subject(&author), group_id, request)) {
        Ok(task) => {
            world.tasks.insert(title, task);
            world.last_outcome = Some(Ok(()));
        }
        Err(err) => world.last_outcome = Some(Err(err)),
    }
    Ok(())
}

#[when(r#""{requester}" deletes the group"#)]
fn delete_group(world: &mut BoardWorld, requester: String) -> Result<(), eyre::Report> {
    let group_id = world.group()?.id();
    let result = run_async(world.api.delete_group(&subject(&requester), group_id));
    world.last_outcome = Some(result.map(|_| ()));
    Ok(())
}
