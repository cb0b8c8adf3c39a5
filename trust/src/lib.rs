//! Filesystem trust checks for dispatch targets.
//!
//! The wrapper only ever executes scripts that are executable by the
//! invoking identity and owned by root or the designated service account.
//! Ownership is verified with `fstat` on an open descriptor and that same
//! descriptor is handed back for `fexecve`, so the inode that was checked
//! is the inode that runs: a path swapped underneath the wrapper between
//! check and exec changes nothing.

mod owner;
mod verify;

pub use verify::TrustError;
pub use verify::VerifiedTarget;
pub use verify::verify_target;
