use std::path::Path;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::error;
use tracing::warn;

use panel_audit::AUDIT_LOG_PATH;
use panel_audit::InvocationRecord;
use panel_audit::NONE_PLACEHOLDER;
use panel_audit::Outcome;
use panel_audit::append_record;
use panel_policy::Operation;
use panel_trust::TrustError;
use panel_trust::verify_target;

use crate::Cli;
use crate::WrapperExit;
use crate::env;
use crate::exec;
use crate::identity;
use crate::identity::CallerIdentity;

/// Non-root account allowed to own dispatch targets, resolved by name at
/// verification time.
const SERVICE_ACCOUNT: &str = "panel";

/// Entry point. Every path out of this function is either an exec of the
/// verified target or a `WrapperExit`.
pub(crate) fn run_main() -> ! {
    init_diagnostics();

    if let Err(err) = panel_process_hardening::harden_process() {
        error!("process hardening failed: {err}");
        WrapperExit::Internal.exit();
    }

    let caller = identity::caller_identity();

    // args() would panic on non-UTF-8 argv; a privileged binary rejects
    // instead.
    let raw_args: Vec<std::ffi::OsString> = std::env::args_os().collect();
    let mut args = Vec::with_capacity(raw_args.len());
    for arg in &raw_args {
        let Some(arg) = arg.to_str() else {
            error!("arguments must be valid UTF-8");
            let operation = raw_args.get(1).map(|a| a.to_string_lossy().into_owned());
            let argument = raw_args.get(2).map(|a| a.to_string_lossy().into_owned());
            write_audit(&record(
                caller,
                operation.as_deref(),
                argument.as_deref(),
                Outcome::UsageError,
            ));
            WrapperExit::Usage.exit();
        };
        args.push(arg.to_string());
    }

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            // CLI introspection, not a maintenance invocation: nothing to
            // audit, no target touched.
            let _ = err.print();
            std::process::exit(0);
        }
        Err(err) => {
            let _ = err.print();
            write_audit(&record(
                caller,
                args.get(1).map(String::as_str),
                args.get(2).map(String::as_str),
                Outcome::UsageError,
            ));
            WrapperExit::Usage.exit();
        }
    };

    dispatch(caller, &cli)
}

fn dispatch(caller: CallerIdentity, cli: &Cli) -> ! {
    let operation_name = cli.operation.as_str();
    let argument = cli.argument.as_deref();

    let Some(operation) = Operation::resolve(operation_name) else {
        error!("unknown operation: {operation_name}");
        write_audit(&record(
            caller,
            Some(operation_name),
            argument,
            Outcome::UnknownOperation,
        ));
        WrapperExit::Usage.exit();
    };

    if let Err(err) = operation.validate(argument) {
        error!("invalid {operation_name} argument: {err}");
        write_audit(&record(
            caller,
            Some(operation_name),
            argument,
            Outcome::InvalidArgument,
        ));
        WrapperExit::InvalidArgument.exit();
    }

    let target = match verify_target(operation.target_path(), SERVICE_ACCOUNT) {
        Ok(target) => target,
        Err(err) => {
            error!("target verification failed: {err}");
            let (outcome, exit) = trust_rejection(&err);
            write_audit(&record(caller, Some(operation_name), argument, outcome));
            exit.exit();
        }
    };

    let child_env = env::sanitized_env(operation, argument);

    // The one audit line for this process lifetime, written before control
    // is handed over.
    write_audit(&record(
        caller,
        Some(operation_name),
        argument,
        Outcome::Exec,
    ));

    let err = exec::exec_verified(&target, &child_env);
    let target_path = target.path().display();
    error!("exec of {target_path} failed: {err}");
    WrapperExit::ExecFailed.exit()
}

/// Map a trust failure onto its audit outcome and exit code. Availability
/// failures (missing, unreadable, not executable) are distinct from
/// integrity failures (wrong owner, not a regular file).
fn trust_rejection(error: &TrustError) -> (Outcome, WrapperExit) {
    match error {
        TrustError::NotExecutable { .. } | TrustError::Inspect { .. } => (
            Outcome::TargetNotExecutable,
            WrapperExit::TargetNotExecutable,
        ),
        TrustError::NotRegularFile { .. } | TrustError::OwnershipInvalid { .. } => (
            Outcome::TargetOwnershipInvalid,
            WrapperExit::TargetOwnershipInvalid,
        ),
    }
}

fn record(
    caller: CallerIdentity,
    operation: Option<&str>,
    argument: Option<&str>,
    outcome: Outcome,
) -> InvocationRecord {
    InvocationRecord {
        timestamp: InvocationRecord::timestamp_now(),
        uid: caller.uid,
        euid: caller.euid,
        gid: caller.gid,
        operation: operation.unwrap_or(NONE_PLACEHOLDER).to_string(),
        argument: argument.unwrap_or(NONE_PLACEHOLDER).to_string(),
        outcome,
    }
}

/// Best-effort: a failed audit write must not change the invocation's own
/// outcome, in either direction.
fn write_audit(invocation: &InvocationRecord) {
    if let Err(err) = append_record(Path::new(AUDIT_LOG_PATH), invocation) {
        warn!("audit log write failed: {err}");
    }
}

/// Diagnostics go to stderr at a fixed level. Deliberately no `EnvFilter`:
/// the unprivileged caller's environment must not steer what a privileged
/// process reports.
fn init_diagnostics() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn availability_failures_map_to_exit_4() {
        let missing = TrustError::NotExecutable {
            path: PathBuf::from("/opt/panel/scripts/autodeploy.sh"),
        };
        assert_eq!(
            trust_rejection(&missing),
            (
                Outcome::TargetNotExecutable,
                WrapperExit::TargetNotExecutable
            )
        );
    }

    #[test]
    fn integrity_failures_map_to_exit_5() {
        let wrong_owner = TrustError::OwnershipInvalid {
            path: PathBuf::from("/opt/panel/scripts/memwatch.sh"),
            owner: 1000,
        };
        assert_eq!(
            trust_rejection(&wrong_owner),
            (
                Outcome::TargetOwnershipInvalid,
                WrapperExit::TargetOwnershipInvalid
            )
        );
        let not_regular = TrustError::NotRegularFile {
            path: PathBuf::from("/opt/panel/scripts"),
        };
        assert_eq!(
            trust_rejection(&not_regular),
            (
                Outcome::TargetOwnershipInvalid,
                WrapperExit::TargetOwnershipInvalid
            )
        );
    }

    #[test]
    fn record_substitutes_placeholders_for_missing_values() {
        let caller = CallerIdentity {
            uid: 1000,
            euid: 0,
            gid: 1000,
        };
        let invocation = record(caller, None, None, Outcome::UsageError);
        assert_eq!(invocation.operation, NONE_PLACEHOLDER);
        assert_eq!(invocation.argument, NONE_PLACEHOLDER);
        assert_eq!(invocation.outcome, Outcome::UsageError);
        assert_eq!(invocation.uid, 1000);
        assert_eq!(invocation.euid, 0);
    }

    #[test]
    fn record_preserves_rejected_input_verbatim() {
        let caller = CallerIdentity {
            uid: 1000,
            euid: 0,
            gid: 1000,
        };
        let invocation = record(
            caller,
            Some("bogus"),
            Some("javascript:alert(1)"),
            Outcome::UnknownOperation,
        );
        assert_eq!(invocation.operation, "bogus");
        assert_eq!(invocation.argument, "javascript:alert(1)");
    }
}
