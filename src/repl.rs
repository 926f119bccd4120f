use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::commands::Flow;
use crate::config::PROMPT;
use crate::dispatch;
use crate::env::Env;
use crate::tokenize::tokenize;

/// Tokenizes and executes one input line.
///
/// An unclosed quote is reported on `err` and the line does nothing.
pub fn eval_line(line: &str, env: &dyn Env, out: &mut dyn Write, err: &mut dyn Write) -> Flow {
    let argv = match tokenize(line) {
        Ok(argv) => argv,
        Err(e) => {
            let _ = writeln!(err, "{}", e);
            let _ = err.flush();
            return Flow::Continue;
        }
    };
    debug!(?argv, "tokenized");
    dispatch::execute(&argv, env, out, err)
}

/// Read-eval loop over a plain reader, used when stdin is not a terminal.
///
/// Writes the prompt before every read. Returns `Flow::Exit` when a command
/// asks to exit and `Flow::Continue` once the input is exhausted.
pub fn run_lines(
    input: &mut dyn BufRead,
    env: &dyn Env,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<Flow> {
    let mut line = String::new();
    loop {
        out.write_all(PROMPT.as_bytes())?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(Flow::Continue);
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);

        if let Flow::Exit(code) = eval_line(trimmed, env, out, err) {
            return Ok(Flow::Exit(code));
        }
    }
}
