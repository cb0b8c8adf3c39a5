use url::Url;

use crate::ArgumentError;

const MAX_LEN: usize = 2048;

/// Bytes that would let a sloppy consumer re-interpret the value if it is
/// ever expanded inside the target shell script. Download URLs have no
/// legitimate need for any of them.
const SHELL_SIGNIFICANT: &[char] = &['`', '\'', '"', '\\', '$', ';', '<', '>', '|', '&', ' '];

/// Grammar for the `autodeploy` argument: a bounded, plain `http`/`https`
/// URL with a host and no shell-significant or control bytes.
pub(crate) fn validate(raw: &str) -> Result<(), ArgumentError> {
    if raw.len() > MAX_LEN {
        return Err(ArgumentError::TooLong { limit: MAX_LEN });
    }
    if raw.chars().any(|c| c.is_ascii_control()) || raw.contains(SHELL_SIGNIFICANT) {
        return Err(ArgumentError::ForbiddenByte);
    }
    let url = Url::parse(raw).map_err(|_| ArgumentError::MalformedUrl)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ArgumentError::SchemeNotAllowed);
    }
    if url.host_str().is_none() {
        return Err(ArgumentError::MissingHost);
    }
    Ok(())
}
