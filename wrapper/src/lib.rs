//! Privileged dispatcher for panel maintenance scripts.
//!
//! `panel-wrapper` is invoked by the unprivileged panel service account
//! through a narrow sudo grant and runs exactly one of a compiled-in set of
//! maintenance scripts, with a validated argument threaded through a single
//! environment variable. Every checkpoint fails closed, every invocation is
//! audited, and a successful dispatch replaces the process image; the
//! caller never gets a privileged shell back.
//!
//! Per-invocation sequence:
//! 1. harden the wrapper process itself,
//! 2. parse the two-positional CLI,
//! 3. resolve the operation against the closed registry,
//! 4. validate the optional argument against the operation's grammar,
//! 5. verify the target script (executable, regular, allowed owner) on an
//!    open descriptor,
//! 6. build the child environment from scratch,
//! 7. append the audit record,
//! 8. `fexecve` the verified descriptor.

mod cli;
mod dispatch;
mod env;
mod exec;
mod exit_code;
mod identity;

pub use cli::Cli;
pub use exit_code::WrapperExit;

/// Run the dispatcher. Never returns: the process either execs the target
/// or exits with one of the [`WrapperExit`] codes.
pub fn run_main() -> ! {
    dispatch::run_main()
}
