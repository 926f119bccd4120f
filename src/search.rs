use std::path::{Path, PathBuf};

use crate::env::{Env, PATH_VAR};

/// Splits the search path into directories, in the order given.
///
/// An unset or empty search path yields no directories.
pub fn search_dirs(env: &dyn Env) -> Vec<PathBuf> {
    match env.var_os(PATH_VAR) {
        Some(value) if !value.is_empty() => std::env::split_paths(&value).collect(),
        _ => Vec::new(),
    }
}

/// Finds the first executable named `command` in the search path.
pub fn find_executable(env: &dyn Env, command: &str) -> Option<PathBuf> {
    search_dirs(env)
        .into_iter()
        .map(|dir| dir.join(command))
        .find(|candidate| is_executable(candidate))
}

/// True for an existing regular file with any execute bit set.
pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path).is_ok_and(|m| {
        m.is_file() && {
            #[cfg(unix)]
            {
                m.permissions().mode() & 0o111 != 0
            }
            #[cfg(not(unix))]
            {
                true
            }
        }
    })
}
