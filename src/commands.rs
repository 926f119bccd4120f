use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::env::{Env, HOME_VAR};
use crate::error::CommandError;
use crate::search;

/// What the read loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// Everything a builtin may touch besides the process working directory.
pub struct Context<'a> {
    pub env: &'a dyn Env,
    pub out: &'a mut dyn Write,
}

pub type Handler = fn(&[String], &mut Context<'_>) -> Result<Flow, CommandError>;

pub struct Builtin {
    pub name: &'static str,
    pub run: Handler,
}

/// Builtin commands, fixed at compile time.
pub static BUILTINS: &[Builtin] = &[
    Builtin { name: "echo", run: echo },
    Builtin { name: "exit", run: exit },
    Builtin { name: "type", run: type_of },
    Builtin { name: "pwd", run: pwd },
    Builtin { name: "cd", run: cd },
];

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

pub fn is_builtin(name: &str) -> bool {
    lookup(name).is_some()
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|b| b.name)
}

fn echo(args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
    writeln!(ctx.out, "{}", args.join(" "))?;
    Ok(Flow::Continue)
}

fn exit(_args: &[String], _ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
    Ok(Flow::Exit(0))
}

fn pwd(_args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
    let cwd = env::current_dir().map_err(CommandError::CurrentDir)?;
    writeln!(ctx.out, "{}", cwd.display())?;
    Ok(Flow::Continue)
}

fn type_of(args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
    let name = args
        .first()
        .ok_or(CommandError::MissingArgument { builtin: "type" })?;

    if is_builtin(name) {
        writeln!(ctx.out, "{} is a shell builtin", name)?;
    } else if search::search_dirs(ctx.env).is_empty() {
        return Err(CommandError::PathNotSet { name: name.clone() });
    } else {
        match search::find_executable(ctx.env, name) {
            Some(path) => writeln!(ctx.out, "{} is {}", name, path.display())?,
            None => return Err(CommandError::TypeNotFound { name: name.clone() }),
        }
    }
    Ok(Flow::Continue)
}

fn cd(args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
    let target = match args.first().map(String::as_str) {
        None | Some("~") => home(ctx.env)?,
        Some(arg) => match arg.strip_prefix("~/") {
            Some(rest) => home(ctx.env)?.join(rest),
            None => PathBuf::from(arg),
        },
    };
    let label = target.display().to_string();

    // Relative targets resolve against the current working directory.
    let resolved = std::path::absolute(&target).map_err(|_| CommandError::NoSuchDirectory {
        target: label.clone(),
    })?;
    if !fs::metadata(&resolved).is_ok_and(|m| m.is_dir()) {
        return Err(CommandError::NoSuchDirectory { target: label });
    }

    env::set_current_dir(&resolved).map_err(|source| CommandError::ChangeDir {
        target: label,
        source,
    })?;
    Ok(Flow::Continue)
}

fn home(env: &dyn Env) -> Result<PathBuf, CommandError> {
    env.var_os(HOME_VAR)
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .ok_or(CommandError::HomeNotSet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::testing::{MapEnv, lock_process, write_script};
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(name: &str, list: &[&str], env: &MapEnv) -> (Result<Flow, CommandError>, String) {
        let mut out = Vec::new();
        let builtin = lookup(name).expect("known builtin");
        let result = (builtin.run)(&args(list), &mut Context { env, out: &mut out });
        (result, String::from_utf8(out).unwrap())
    }

    /// Restores the working directory when dropped.
    struct CwdGuard(PathBuf);

    impl CwdGuard {
        fn new() -> Self {
            Self(env::current_dir().unwrap())
        }
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = env::set_current_dir(&self.0);
        }
    }

    #[test]
    fn test_echo() {
        let (result, out) = run("echo", &["hello", "world"], &MapEnv::default());
        assert_eq!(result.unwrap(), Flow::Continue);
        assert_eq!(out, "hello world\n");
    }

    #[test]
    fn test_echo_without_args_prints_newline() {
        let (_, out) = run("echo", &[], &MapEnv::default());
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_exit() {
        let (result, out) = run("exit", &["3"], &MapEnv::default());
        assert_eq!(result.unwrap(), Flow::Exit(0));
        assert!(out.is_empty());
    }

    #[test]
    fn test_type_builtin() {
        let (_, out) = run("type", &["echo"], &MapEnv::default());
        assert_eq!(out, "echo is a shell builtin\n");
    }

    #[test]
    fn test_type_external() {
        let _guard = lock_process();
        let dir = tempfile::tempdir().unwrap();
        let tool = write_script(dir.path(), "tool", "true", 0o755);
        let env = MapEnv::default().with_path(&[dir.path()]);

        let (_, out) = run("type", &["tool"], &env);
        assert_eq!(out, format!("tool is {}\n", tool.display()));
    }

    #[test]
    fn test_type_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let env = MapEnv::default().with_path(&[dir.path()]);

        let (result, out) = run("type", &["nonexistent_xyz"], &env);
        assert_eq!(result.unwrap_err().to_string(), "nonexistent_xyz: not found");
        assert!(out.is_empty());
    }

    #[test]
    fn test_type_without_path() {
        let (result, out) = run("type", &["ls"], &MapEnv::default());
        assert_eq!(result.unwrap_err().to_string(), "ls: PATH not set");
        assert!(out.is_empty());

        let env = MapEnv::default().with(crate::env::PATH_VAR, "");
        let (result, _) = run("type", &["ls"], &env);
        assert_eq!(result.unwrap_err().to_string(), "ls: PATH not set");
    }

    #[test]
    fn test_type_missing_argument() {
        let (result, _) = run("type", &[], &MapEnv::default());
        assert_eq!(result.unwrap_err().to_string(), "type: missing argument");
    }

    #[test]
    fn test_cd_and_pwd() {
        let _guard = lock_process();
        let _cwd = CwdGuard::new();
        let dir = tempfile::tempdir().unwrap();
        let canonical = dir.path().canonicalize().unwrap();

        let (result, _) = run("cd", &[canonical.to_str().unwrap()], &MapEnv::default());
        assert_eq!(result.unwrap(), Flow::Continue);
        let (_, out) = run("pwd", &[], &MapEnv::default());
        assert_eq!(out, format!("{}\n", canonical.display()));
    }

    #[test]
    fn test_cd_relative_path() {
        let _guard = lock_process();
        let _cwd = CwdGuard::new();
        let dir = tempfile::tempdir().unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        fs::create_dir(canonical.join("child")).unwrap();
        env::set_current_dir(&canonical).unwrap();

        run("cd", &["child"], &MapEnv::default()).0.unwrap();
        assert_eq!(env::current_dir().unwrap(), canonical.join("child"));
        run("cd", &[".."], &MapEnv::default()).0.unwrap();
        assert_eq!(env::current_dir().unwrap(), canonical);
    }

    #[test]
    fn test_cd_home() {
        let _guard = lock_process();
        let _cwd = CwdGuard::new();
        let dir = tempfile::tempdir().unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        fs::create_dir(canonical.join("docs")).unwrap();
        let env = MapEnv::default().with(HOME_VAR, canonical.as_os_str());

        run("cd", &[], &env).0.unwrap();
        assert_eq!(env::current_dir().unwrap(), canonical);
        run("cd", &["/"], &env).0.unwrap();
        run("cd", &["~"], &env).0.unwrap();
        assert_eq!(env::current_dir().unwrap(), canonical);
        run("cd", &["~/docs"], &env).0.unwrap();
        assert_eq!(env::current_dir().unwrap(), canonical.join("docs"));
    }

    #[test]
    fn test_cd_without_home() {
        let (result, _) = run("cd", &[], &MapEnv::default());
        assert_eq!(result.unwrap_err().to_string(), "cd: HOME not set");
    }

    #[test]
    fn test_cd_to_file_fails_and_keeps_cwd() {
        let _guard = lock_process();
        let _cwd = CwdGuard::new();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let before = env::current_dir().unwrap();

        let (result, _) = run("cd", &[file.to_str().unwrap()], &MapEnv::default());
        assert_eq!(
            result.unwrap_err().to_string(),
            format!("cd: {}: No such file or directory", file.display())
        );
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_cd_missing_directory() {
        let (result, _) = run("cd", &["/does/not/exist"], &MapEnv::default());
        assert_eq!(
            result.unwrap_err().to_string(),
            "cd: /does/not/exist: No such file or directory"
        );
    }

    #[test]
    fn test_builtin_names() {
        let mut all: Vec<_> = names().collect();
        all.sort_unstable();
        assert_eq!(all, vec!["cd", "echo", "exit", "pwd", "type"]);
    }
}
