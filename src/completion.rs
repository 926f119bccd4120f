use rustyline::Helper;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;

use crate::commands;
use crate::env::ProcessEnv;
use crate::search;

/// Shell completer for tab completion.
pub struct ShellCompleter {
    builtins: Vec<String>,
    filename_completer: FilenameCompleter,
}

impl ShellCompleter {
    pub fn new() -> Self {
        Self {
            builtins: commands::names().map(str::to_string).collect(),
            filename_completer: FilenameCompleter::new(),
        }
    }

    /// Builtins and search-path executables starting with `word`.
    fn command_candidates(&self, word: &str) -> Vec<Pair> {
        let mut names: Vec<String> = self
            .builtins
            .iter()
            .filter(|b| b.starts_with(word))
            .cloned()
            .collect();

        for dir in search::search_dirs(&ProcessEnv) {
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            names.extend(
                entries
                    .flatten()
                    .filter(|e| search::is_executable(&e.path()))
                    .filter_map(|e| e.file_name().into_string().ok())
                    .filter(|name| name.starts_with(word)),
            );
        }

        names.sort();
        names.dedup();
        names
            .into_iter()
            .map(|name| Pair {
                replacement: format!("{} ", name),
                display: name,
            })
            .collect()
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context<'_>,
    ) -> Result<(usize, Vec<Self::Candidate>), ReadlineError> {
        let (start, word) = extract_word(line, pos);
        if is_first_word(line, pos) {
            Ok((start, self.command_candidates(word)))
        } else {
            self.filename_completer.complete(line, pos, ctx)
        }
    }
}

fn is_first_word(line: &str, pos: usize) -> bool {
    !line[..pos].trim_start().contains(' ')
}

fn extract_word(line: &str, pos: usize) -> (usize, &str) {
    let before = &line[..pos];
    let start = before.rfind(' ').map_or(0, |i| i + 1);
    (start, &line[start..pos])
}

impl Helper for ShellCompleter {}
impl Hinter for ShellCompleter {
    type Hint = String;
}
impl Highlighter for ShellCompleter {}
impl Validator for ShellCompleter {}
