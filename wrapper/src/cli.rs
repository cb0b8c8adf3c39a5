use clap::Parser;

/// Run one predefined panel maintenance operation with elevated privileges.
///
/// Parsed with `try_parse_from` so that usage errors flow through the same
/// audit-then-exit pipeline as every other rejection instead of clap
/// exiting on its own.
#[derive(Debug, Parser)]
#[command(name = "panel-wrapper", version, about)]
pub struct Cli {
    /// Maintenance operation to dispatch: `autodeploy` or `memwatch`.
    pub operation: String,

    /// Optional operation argument, passed to the target script through its
    /// designated environment variable, never as a positional argument.
    pub argument: Option<String>,
}
