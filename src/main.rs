mod commands;
mod completion;
mod config;
mod dispatch;
mod env;
mod error;
mod external;
mod logging;
mod repl;
mod search;
mod tokenize;

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing::debug;

use crate::commands::Flow;
use crate::completion::ShellCompleter;
use crate::config::{PROMPT, ShellConfig};
use crate::env::ProcessEnv;

fn main() -> Result<()> {
    let env = ProcessEnv;
    let config = ShellConfig::from_env(&env);
    logging::setup_logging(&config.log_filter);
    debug!(?config, "starting shell");

    if !io::stdin().is_terminal() {
        let flow = repl::run_lines(
            &mut io::stdin().lock(),
            &env,
            &mut io::stdout(),
            &mut io::stderr(),
        )
        .context("failed to read input")?;
        if let Flow::Exit(code) = flow {
            std::process::exit(code);
        }
        return Ok(());
    }

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.history_size)
        .context("invalid history size")?
        .auto_add_history(true)
        .build();
    let mut editor: Editor<ShellCompleter, DefaultHistory> =
        Editor::with_config(editor_config).context("failed to initialize line editor")?;
    editor.set_helper(Some(ShellCompleter::new()));

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => continue,
            Err(e) => return Err(e).context("failed to read input"),
        };

        let flow = repl::eval_line(&line, &env, &mut io::stdout(), &mut io::stderr());
        if let Flow::Exit(code) = flow {
            std::process::exit(code);
        }
    }

    Ok(())
}
