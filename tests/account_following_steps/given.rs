//! Given steps for account following BDD scenarios.

use super::world::{AccountWorld, run_async, signup_request};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a signed-up account "{name}""#)]
fn signed_up_account(world: &mut AccountWorld, name: String) -> Result<(), eyre::Report> {
    let staged = world
        .session
        .signup(signup_request(&name, &format!("{name}@test.com")))
        .wrap_err("stage signup")?;
    let receipt = run_async(world.session.commit()).wrap_err("commit signup")?;
    let id = receipt
        .account_id(staged)
        .ok_or_else(|| eyre::eyre!("receipt is missing the staged account"))?;
    world.accounts.insert(name, id);
    Ok(())
}

#[given(r#""{follower}" already follows "{followed}""#)]
fn already_follows(
    world: &mut AccountWorld,
    follower: String,
    followed: String,
) -> Result<(), eyre::Report> {
    let follower = world.id_of(&follower)?;
    let followed = world.id_of(&followed)?;
    world.session.follow(follower, followed)?;
    run_async(world.session.commit()).wrap_err("commit follow")?;
    Ok(())
}
