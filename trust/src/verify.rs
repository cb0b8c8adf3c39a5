use std::ffi::CString;
use std::fs::File;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

use crate::owner;

/// Why a dispatch target failed trust verification.
#[derive(Debug, Error)]
pub enum TrustError {
    #[error("target is missing or not executable by the invoking user: {}", path.display())]
    NotExecutable { path: PathBuf },
    #[error("failed to inspect target {}: {source}", path.display())]
    Inspect { path: PathBuf, source: io::Error },
    #[error("target is not a regular file: {}", path.display())]
    NotRegularFile { path: PathBuf },
    #[error("target {} is owned by uid {owner}, which is not an allowed principal", path.display())]
    OwnershipInvalid { path: PathBuf, owner: u32 },
}

/// A target that passed every trust check, together with the open
/// descriptor the checks ran against. Executing this descriptor (rather
/// than re-resolving the path) is what closes the check-to-exec window.
#[derive(Debug)]
pub struct VerifiedTarget {
    path: PathBuf,
    file: File,
}

impl VerifiedTarget {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &File {
        &self.file
    }
}

/// Verify `path` as a dispatch target.
///
/// Checks run in order, each mapping to its own rejection:
/// 1. executable by the *real* (invoking) identity; `access(2)` evaluates
///    real ids, which is exactly the semantics wanted for a privileged
///    wrapper acting on behalf of an unprivileged caller;
/// 2. a regular file;
/// 3. owned by root or by `service_account` (resolved by name, never by a
///    caller-supplied identifier).
///
/// Checks 2 and 3 run on the opened descriptor, which is returned for the
/// final exec.
pub fn verify_target(path: &Path, service_account: &str) -> Result<VerifiedTarget, TrustError> {
    let c_path =
        CString::new(path.as_os_str().as_bytes()).map_err(|_| TrustError::NotExecutable {
            path: path.to_path_buf(),
        })?;
    let rc = unsafe { libc::access(c_path.as_ptr(), libc::X_OK) };
    if rc != 0 {
        return Err(TrustError::NotExecutable {
            path: path.to_path_buf(),
        });
    }

    // File::open is O_RDONLY | O_CLOEXEC; every check below, and the exec
    // that follows in the dispatcher, uses this one descriptor.
    let file = File::open(path).map_err(|source| TrustError::Inspect {
        path: path.to_path_buf(),
        source,
    })?;
    let metadata = file.metadata().map_err(|source| TrustError::Inspect {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(TrustError::NotRegularFile {
            path: path.to_path_buf(),
        });
    }

    let file_owner = metadata.uid();
    let service_uid = owner::uid_of(service_account);
    if file_owner != 0 && Some(file_owner) != service_uid {
        return Err(TrustError::OwnershipInvalid {
            path: path.to_path_buf(),
            owner: file_owner,
        });
    }

    Ok(VerifiedTarget {
        path: path.to_path_buf(),
        file,
    })
}
