//! Hardening the wrapper applies to itself before looking at any caller
//! input.
//!
//! The wrapper runs with elevated privileges on behalf of an unprivileged
//! caller, so its own process state is part of the attack surface: a core
//! dump or an attached debugger would expose privileged memory, and loader
//! variables inherited from the caller have no business in its
//! environment.

use std::ffi::OsString;
use std::io;
use std::os::unix::ffi::OsStrExt;

/// Apply all hardening steps. Any failure is returned to the caller, which
/// treats it as a refusal to dispatch, never as a warning.
pub fn harden_process() -> io::Result<()> {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    deny_dumping()?;
    zero_core_limit()?;
    scrub_loader_env();
    Ok(())
}

/// Mark the process non-dumpable: no core files, no ptrace attach from the
/// caller's other processes.
#[cfg(any(target_os = "linux", target_os = "android"))]
fn deny_dumping() -> io::Result<()> {
    let rc = unsafe { libc::prctl(libc::PR_SET_DUMPABLE, 0, 0, 0, 0) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Core-file size limit of zero, in case dumpability is ever re-acquired.
fn zero_core_limit() -> io::Result<()> {
    let rlim = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    let rc = unsafe { libc::setrlimit(libc::RLIMIT_CORE, &rlim) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Drop `LD_*` and `DYLD_*` from the wrapper's own environment. The child
/// environment is built from scratch elsewhere; this protects the wrapper
/// process itself.
fn scrub_loader_env() {
    for key in loader_env_keys(std::env::vars_os()) {
        unsafe {
            std::env::remove_var(&key);
        }
    }
}

fn loader_env_keys<I>(vars: I) -> Vec<OsString>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, _)| {
            let bytes = key.as_os_str().as_bytes();
            (bytes.starts_with(b"LD_") || bytes.starts_with(b"DYLD_")).then_some(key)
        })
        .collect()
}
