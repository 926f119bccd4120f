use std::ffi::OsString;

pub const PATH_VAR: &str = "PATH";
pub const HOME_VAR: &str = "HOME";

/// Read access to environment variables.
///
/// Values are looked up on every call; nothing is cached, so changes to the
/// live environment are seen by the next lookup.
pub trait Env {
    fn var_os(&self, key: &str) -> Option<OsString>;
}

/// The environment of the running process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}
