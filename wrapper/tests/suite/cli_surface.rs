//! Help and version are CLI introspection: exit 0, no dispatch.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;

fn wrapper() -> Result<Command> {
    Ok(Command::cargo_bin("panel-wrapper")?)
}

#[test]
fn help_exits_zero() -> Result<()> {
    wrapper()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("panel-wrapper"));
    Ok(())
}

#[test]
fn version_exits_zero() -> Result<()> {
    wrapper()?.arg("--version").assert().success();
    Ok(())
}

#[test]
fn help_mentions_both_operations() -> Result<()> {
    wrapper()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("autodeploy"))
        .stdout(predicate::str::contains("memwatch"));
    Ok(())
}
