use std::fmt;
use std::io;

/// Which quote character was left open at the end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Single,
    Double,
}

impl fmt::Display for QuoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteKind::Single => f.write_str("single"),
            QuoteKind::Double => f.write_str("double"),
        }
    }
}

/// Failure to split an input line into arguments.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Error: unclosed {0} quote")]
    UnclosedQuote(QuoteKind),
}

/// Errors raised while resolving or running a command.
///
/// Each variant renders as the single diagnostic line written to stderr.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{cmd}: command not found")]
    NotFound { cmd: String },

    #[error("Error Executing {cmd}: {source}")]
    Exec {
        cmd: String,
        #[source]
        source: io::Error,
    },

    #[error("{builtin}: missing argument")]
    MissingArgument { builtin: &'static str },

    #[error("{name}: not found")]
    TypeNotFound { name: String },

    #[error("{name}: PATH not set")]
    PathNotSet { name: String },

    #[error("cd: {target}: No such file or directory")]
    NoSuchDirectory { target: String },

    #[error("cd: {target}: {source}")]
    ChangeDir {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("cd: HOME not set")]
    HomeNotSet,

    #[error("pwd: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("write error: {0}")]
    Write(#[from] io::Error),
}
