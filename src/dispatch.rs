use std::io::Write;

use tracing::{debug, warn};

use crate::commands::{self, Context, Flow};
use crate::env::Env;
use crate::error::CommandError;
use crate::external;
use crate::search;

/// Executes one tokenized command line.
///
/// Builtins run in-process; anything else is resolved against the search
/// path and run as a child whose captured output is copied to `out`. Every
/// failure is reported as one line on `err` and the loop continues.
pub fn execute(argv: &[String], env: &dyn Env, out: &mut dyn Write, err: &mut dyn Write) -> Flow {
    let flow = match run(argv, env, out) {
        Ok(flow) => flow,
        Err(e) => {
            let _ = writeln!(err, "{}", e);
            let _ = err.flush();
            Flow::Continue
        }
    };
    let _ = out.flush();
    flow
}

fn run(argv: &[String], env: &dyn Env, out: &mut dyn Write) -> Result<Flow, CommandError> {
    let Some((cmd, rest)) = argv.split_first() else {
        return Ok(Flow::Continue);
    };

    if let Some(builtin) = commands::lookup(cmd) {
        debug!(builtin = builtin.name, "running builtin");
        return (builtin.run)(rest, &mut Context { env, out });
    }

    let path = search::find_executable(env, cmd)
        .ok_or_else(|| CommandError::NotFound { cmd: cmd.clone() })?;
    debug!(cmd = %cmd, path = %path.display(), "resolved external command");

    let output = external::run_captured(&path, rest).map_err(|source| {
        warn!(cmd = %cmd, error = %source, "failed to execute");
        CommandError::Exec {
            cmd: cmd.clone(),
            source,
        }
    })?;
    out.write_all(&output)?;
    Ok(Flow::Continue)
}
