use std::io;

use crate::option::OPTION_KEY_MAX;

pub type HostResult<T> = Result<T, HostError>;

/// Errors raised by the host. Resolution misses are not errors: the
/// locator reports them as `None`.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("option key is longer than {} characters", OPTION_KEY_MAX - 1)]
    OptionKeyTooLong,

    #[error("wildcard expansion is too large")]
    WildcardTooLarge,

    #[error("path is longer than {max} bytes")]
    PathTooLong { max: usize },

    #[error("no such script `{0}`")]
    ScriptNotFound(String),

    #[error("no such module `{0}`")]
    ModuleNotFound(String),

    #[error("entry point `{0}` is not defined")]
    MissingEntryPoint(String),

    #[error("invalid configuration: {0}")]
    Config(&'static str),

    #[error("cannot access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Script(#[from] ScriptError),

    /// The runtime rejected a host-side operation (allocation, registration).
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl HostError {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        HostError::Io {
            path: path.into(),
            source,
        }
    }

    /// Message and optional traceback, the two values the top-level error
    /// handler receives.
    pub fn report(&self) -> (String, Option<&str>) {
        match self {
            HostError::Script(ScriptError::Runtime { message, traceback }) => {
                (message.clone(), traceback.as_deref())
            }
            other => (other.to_string(), None),
        }
    }
}

/// Failures of script code, as opposed to failures of the host itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// The source could not be compiled; the message carries the location.
    #[error("{message}")]
    Load { message: String },

    /// An error raised while the script was running.
    #[error("{message}")]
    Runtime {
        message: String,
        traceback: Option<String>,
    },
}
