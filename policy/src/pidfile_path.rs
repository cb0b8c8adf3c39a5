use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::ArgumentError;

const MAX_LEN: usize = 4096;

/// Directories a pid file may live under. `/run` is included alongside
/// `/var/run` because modern systems symlink one to the other and the
/// check here is lexical.
const ALLOWED_ROOTS: [&str; 4] = ["/run", "/var/run", "/var/tmp", "/tmp"];

/// Grammar for the `memwatch` argument: a bounded absolute path, built from
/// a conservative byte set, that still sits strictly below one of the
/// allowed runtime directories after `.`/`..` are resolved lexically.
pub(crate) fn validate(raw: &str) -> Result<(), ArgumentError> {
    if raw.len() > MAX_LEN {
        return Err(ArgumentError::TooLong { limit: MAX_LEN });
    }
    if !raw.starts_with('/') {
        return Err(ArgumentError::NotAbsolute);
    }
    if !raw
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-' | b'/'))
    {
        return Err(ArgumentError::ForbiddenByte);
    }

    let normalized = normalize_lexically(Path::new(raw));
    let inside_allowed_root = ALLOWED_ROOTS.iter().any(|root| {
        let root = Path::new(root);
        normalized.starts_with(root) && normalized != root
    });
    if !inside_allowed_root {
        return Err(ArgumentError::OutsideAllowedRoots);
    }
    Ok(())
}

/// Resolve `.` and `..` components without consulting the filesystem.
/// `..` at the root stays at the root, matching the kernel's path walk.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::RootDir => normalized.push("/"),
            Component::CurDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}
