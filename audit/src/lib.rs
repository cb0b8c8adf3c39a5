//! Append-only audit trail for wrapper invocations.
//!
//! Every run of the wrapper, accepted or rejected, appends exactly one
//! JSON line to a fixed log file, so attempted misuse is as visible as
//! legitimate use. Records are written with a single append-mode write;
//! concurrent invocations are separate processes and `O_APPEND` keeps
//! their lines whole.

use chrono::Local;
use chrono::SecondsFormat;
use serde::Deserialize;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

/// Where invocation records land. Compiled in, like every other path the
/// wrapper touches.
pub const AUDIT_LOG_PATH: &str = "/var/log/panel/panel-wrapper.log";

/// Placeholder recorded when the caller supplied no value.
pub const NONE_PLACEHOLDER: &str = "(none)";

/// Terminal result of one wrapper invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    UsageError,
    UnknownOperation,
    InvalidArgument,
    TargetNotExecutable,
    TargetOwnershipInvalid,
    Exec,
}

/// One line in the audit log.
///
/// Operation and argument are recorded exactly as supplied, even when they
/// were the reason for rejection; the log is where misuse gets diagnosed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRecord {
    pub timestamp: String,
    pub uid: u32,
    pub euid: u32,
    pub gid: u32,
    pub operation: String,
    pub argument: String,
    pub outcome: Outcome,
}

impl InvocationRecord {
    /// RFC 3339 with the local offset, second precision. Lines up with
    /// syslog when operators cross-reference the trail.
    pub fn timestamp_now() -> String {
        Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

/// Append `record` to the log at `path` as one JSON line.
///
/// The file is opened fresh per invocation in append mode (created `0600`
/// if absent) and the whole line goes out through one `write_all`, so
/// records from concurrent invocations never interleave.
pub fn append_record(path: &Path, record: &InvocationRecord) -> io::Result<()> {
    let mut line = serde_json::to_vec(record).map_err(io::Error::other)?;
    line.push(b'\n');

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(&line)
}
