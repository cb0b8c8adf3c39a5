use std::path::Path;

use crate::ArgumentError;
use crate::download_url;
use crate::pidfile_path;

/// A maintenance operation the wrapper may dispatch.
///
/// The set is closed and compiled in. Targets and env keys are constants of
/// the binary, never read from configuration or caller input, so a caller
/// can at most pick one of these variants, never redirect execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fetch a release archive and apply it.
    Autodeploy,
    /// Run the memory-pressure watchdog and capture a core if needed.
    Memwatch,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Autodeploy, Operation::Memwatch];

    /// Exact-match lookup. No prefix matching, no case folding: anything
    /// but the two literal names is rejected.
    pub fn resolve(name: &str) -> Option<Self> {
        match name {
            "autodeploy" => Some(Self::Autodeploy),
            "memwatch" => Some(Self::Memwatch),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Autodeploy => "autodeploy",
            Self::Memwatch => "memwatch",
        }
    }

    /// Absolute path of the script implementing this operation.
    pub fn target_path(self) -> &'static Path {
        match self {
            Self::Autodeploy => Path::new("/opt/panel/scripts/autodeploy.sh"),
            Self::Memwatch => Path::new("/opt/panel/scripts/memwatch.sh"),
        }
    }

    /// Environment variable through which the validated argument reaches
    /// the target script. The argument never travels as a positional.
    pub fn env_key(self) -> &'static str {
        match self {
            Self::Autodeploy => "DOWNLOAD_URL",
            Self::Memwatch => "ET_PID_FILE",
        }
    }

    /// Grammar check for the optional positional argument. A missing
    /// argument is always acceptable; the target script falls back to its
    /// own default.
    pub fn validate(self, argument: Option<&str>) -> Result<(), ArgumentError> {
        match argument {
            None => Ok(()),
            Some(argument) => match self {
                Self::Autodeploy => download_url::validate(argument),
                Self::Memwatch => pidfile_path::validate(argument),
            },
        }
    }
}
