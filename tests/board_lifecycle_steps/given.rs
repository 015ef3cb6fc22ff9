//! Given steps for board lifecycle BDD scenarios.

use super::world::{BoardWorld, run_async, subject};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::{
    board::{domain::Role, services::CreateGroupRequest},
    identity::services::RegisterUserRequest,
};

#[given(r#"registered users "{first}" and "{second}""#)]
fn registered_users(
    world: &mut BoardWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    for name in [first, second] {
        let user = run_async(world.api.identity().register(RegisterUserRequest::new(
            name.as_str(),
            name.as_str(),
            format!("hash-{name}"),
        )))
        .wrap_err_with(|| format!("register {name}"))?;
        world.users.insert(name, user.id());
    }
    Ok(())
}

#[given(r#""{owner}" has created the group "{name}""#)]
fn group_created(world: &mut BoardWorld, owner: String, name: String) -> Result<(), eyre::Report> {
    let group = run_async(
        world
            .api
            .create_group(&subject(&owner), CreateGroupRequest::new(name)),
    )
    .wrap_err("create scenario group")?;
    world.group = Some(group);
    world.owner = Some(owner);
    Ok(())
}

#[given(r#""{member}" has joined the group as "{role_name}""#)]
fn member_joined(
    world: &mut BoardWorld,
    member: String,
    role_name: String,
) -> Result<(), eyre::Report> {
    let role = Role::try_from(role_name.as_str())
        .map_err(|err| eyre::eyre!("invalid role in scenario: {err}"))?;
    let group_id = world.group()?.id();
    let member_id = world.user_id(&member)?;
    let owner = world
        .owner
        .clone()
        .ok_or_else(|| eyre::eyre!("missing group owner in scenario world"))?;
    run_async(
        world
            .api
            .add_member(&subject(&owner), group_id, member_id, role),
    )
    .wrap_err("add scenario member")?;
    Ok(())
}
