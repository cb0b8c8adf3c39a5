use panel_policy::Operation;

/// Fixed `PATH` for the target script.
pub(crate) const CHILD_PATH: &str = "/usr/bin:/bin";

/// Fixed locale for the target script.
pub(crate) const CHILD_LANG: &str = "C";

/// Build the child environment from scratch.
///
/// The ambient environment of the invoking process is never copied or
/// filtered. The child sees `PATH`, `LANG`, and, when the caller supplied
/// a validated argument, exactly one `env_key=value` entry. Scripts that
/// trust their environment therefore only ever see values this binary
/// chose or validated.
pub(crate) fn sanitized_env(
    operation: Operation,
    argument: Option<&str>,
) -> Vec<(String, String)> {
    let mut child_env = vec![
        ("PATH".to_string(), CHILD_PATH.to_string()),
        ("LANG".to_string(), CHILD_LANG.to_string()),
    ];
    if let Some(argument) = argument {
        child_env.push((operation.env_key().to_string(), argument.to_string()));
    }
    child_env
}
