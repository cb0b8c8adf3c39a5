/// Stable exit codes, part of the contract with the orchestration scripts
/// that drive the wrapper. Zero never appears on a successful dispatch:
/// success replaces the process image and the target's status is what the
/// parent eventually observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum WrapperExit {
    /// Missing or unknown operation, or malformed command line.
    Usage = 2,
    /// Argument failed the operation's grammar.
    InvalidArgument = 3,
    /// Target script missing or not executable by the invoking user.
    TargetNotExecutable = 4,
    /// Target script exists but is not owned by an allowed principal.
    TargetOwnershipInvalid = 5,
    /// Process replacement itself failed.
    ExecFailed = 6,
    /// Pre-dispatch failure inside the wrapper (hardening), before any
    /// caller input was considered.
    Internal = 10,
}

impl WrapperExit {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}
