use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

fn build_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("off"))
}

/// Initialize the global tracing subscriber.
///
/// Events go to stderr only; stdout carries command output and must stay
/// byte-exact.
pub fn setup_logging(directives: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directives))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
