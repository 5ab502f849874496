// Host configuration

use std::env;

use luars::lua_vm::SafeOption;

use crate::error::{HostError, HostResult};

/// Script run at startup, located like any other script.
pub const MAIN_SCRIPT: &str = "src/_premake_main.lua";
/// Global function the main script defines; its result is the exit code.
pub const ENTRY_POINT: &str = "_premake_main";
/// Extra `;` separated search directories.
pub const PATH_ENV_VAR: &str = "PREMAKE6_PATH";
/// Log filter used by the executable.
pub const LOG_ENV_VAR: &str = "PREMAKE_LOG";
/// Memory limit of the runtime, in bytes.
pub const MAX_MEMORY: isize = 1024 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct HostConfig {
    pub main_script: String,
    pub entry_point: String,
    pub home_dir: String,
    pub env_search_path: Option<String>,
    pub safe_option: SafeOption,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            main_script: MAIN_SCRIPT.to_string(),
            entry_point: ENTRY_POINT.to_string(),
            home_dir: "~".to_string(),
            env_search_path: None,
            safe_option: SafeOption::default(),
        }
    }
}

impl HostConfig {
    /// Configuration from the process environment. This is the only place
    /// the host reads environment variables.
    pub fn from_env() -> Self {
        let home_dir = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .unwrap_or_else(|_| "~".to_string());

        HostConfig {
            home_dir,
            env_search_path: env::var(PATH_ENV_VAR).ok(),
            // call depth limits keep the runtime's defaults; the executable
            // runs on a thread with a large stack
            safe_option: SafeOption {
                max_memory_limit: MAX_MEMORY,
                ..SafeOption::default()
            },
            ..Default::default()
        }
    }

    pub fn validate(&self) -> HostResult<()> {
        if self.main_script.is_empty() {
            return Err(HostError::Config("main script is empty"));
        }
        if self.entry_point.is_empty() {
            return Err(HostError::Config("entry point is empty"));
        }
        Ok(())
    }
}
