// Premake host
// Embeds the Lua runtime, resolves scripts and modules along the premake
// search path and runs the scripted core.

#[cfg(test)]
mod test;

pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod locate;
pub mod option;
pub mod os;
pub mod path;
pub mod search_path;
pub mod strings;
pub mod wildcard;

pub use config::HostConfig;
pub use context::{HostContext, ScriptFrame, SharedContext};
pub use error::{HostError, HostResult, ScriptError};
pub use host::{ErrorHandler, Premake};
pub use locate::{Pattern, locate, locate_module, locate_script};
pub use option::{CliOption, get_option_value, parse_option_key, parse_option_value};
pub use path::PathKind;
pub use search_path::{SearchEntry, SearchPath, SearchPathSources};
pub use strings::StringArg;
pub use wildcard::pattern_from_wildcards;
