use std::ffi::OsString;

use crate::env::Env;

pub const PROMPT: &str = "$ ";

pub const LOG_VAR: &str = "MYSHELL_LOG";
pub const HISTORY_SIZE_VAR: &str = "MYSHELL_HISTORY_SIZE";

const DEFAULT_LOG_FILTER: &str = "off";
const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Startup settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// `tracing_subscriber::EnvFilter` directives.
    pub log_filter: String,
    pub history_size: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

impl ShellConfig {
    pub fn from_env(env: &dyn Env) -> Self {
        let defaults = Self::default();
        Self {
            log_filter: env
                .var_os(LOG_VAR)
                .and_then(non_empty)
                .unwrap_or(defaults.log_filter),
            history_size: env
                .var_os(HISTORY_SIZE_VAR)
                .and_then(non_empty)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.history_size),
        }
    }
}

fn non_empty(value: OsString) -> Option<String> {
    value.into_string().ok().filter(|v| !v.trim().is_empty())
}
