//! Black-box rejection scenarios: every checkpoint refuses with its own
//! exit code and without touching anything beyond it.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn wrapper() -> Result<Command> {
    Ok(Command::cargo_bin("panel-wrapper")?)
}

#[test]
fn unknown_operation_exits_2() -> Result<()> {
    wrapper()?
        .arg("bogus")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown operation"));
    Ok(())
}

#[test]
fn missing_operation_exits_2() -> Result<()> {
    wrapper()?.assert().failure().code(2);
    Ok(())
}

#[test]
fn surplus_arguments_exit_2() -> Result<()> {
    wrapper()?
        .args(["memwatch", "/tmp/a.pid", "extra"])
        .assert()
        .failure()
        .code(2);
    Ok(())
}

#[test]
fn case_variant_operation_is_not_recognized() -> Result<()> {
    wrapper()?.arg("Autodeploy").assert().failure().code(2);
    Ok(())
}

#[test]
fn javascript_url_exits_3() -> Result<()> {
    wrapper()?
        .args(["autodeploy", "javascript:alert(1)"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("invalid autodeploy argument"));
    Ok(())
}

#[test]
fn ftp_url_exits_3() -> Result<()> {
    wrapper()?
        .args(["autodeploy", "ftp://evil.example.com/x"])
        .assert()
        .failure()
        .code(3);
    Ok(())
}

#[test]
fn shell_metacharacters_in_url_exit_3() -> Result<()> {
    wrapper()?
        .args(["autodeploy", "https://example.com/$(reboot)"])
        .assert()
        .failure()
        .code(3);
    Ok(())
}

#[test]
fn pidfile_outside_allowed_roots_exits_3() -> Result<()> {
    wrapper()?
        .args(["memwatch", "/etc/passwd"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("invalid memwatch argument"));
    Ok(())
}

#[test]
fn pidfile_traversal_exits_3() -> Result<()> {
    wrapper()?
        .args(["memwatch", "/tmp/../etc/passwd"])
        .assert()
        .failure()
        .code(3);
    Ok(())
}

#[test]
fn pidfile_with_shell_metacharacters_exits_3() -> Result<()> {
    wrapper()?
        .args(["memwatch", "/tmp/x;reboot"])
        .assert()
        .failure()
        .code(3);
    Ok(())
}

#[test]
fn non_utf8_argument_exits_2() -> Result<()> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    wrapper()?
        .arg("memwatch")
        .arg(OsStr::from_bytes(b"/tmp/\xff.pid"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("valid UTF-8"));
    Ok(())
}

#[test]
fn valid_invocation_without_installed_target_exits_4() -> Result<()> {
    // On a development or CI host the target scripts are not installed, so
    // a well-formed invocation stops at the trust check. Skip when a real
    // installation is present: dispatch would exec it.
    if Path::new("/opt/panel/scripts/autodeploy.sh").exists() {
        return Ok(());
    }
    wrapper()?
        .args(["autodeploy", "https://example.com/release.tar.gz"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("target verification failed"));
    Ok(())
}

#[test]
fn memwatch_without_installed_target_exits_4() -> Result<()> {
    if Path::new("/opt/panel/scripts/memwatch.sh").exists() {
        return Ok(());
    }
    wrapper()?
        .args(["memwatch", "/tmp/panel.pid"])
        .assert()
        .failure()
        .code(4);
    Ok(())
}
