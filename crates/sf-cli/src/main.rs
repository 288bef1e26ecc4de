mod cli;

use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    if let Err(e) = cli::run() {
        eprintln!("{e:#}"); // pretty anyhow chain
        std::process::exit(1);
    }
}

/// Logs go to stderr (stdout is for command output). Quiet unless `SF_LOG`
/// asks for more, e.g. `SF_LOG=debug` or `SF_LOG=sf_core=trace`.
fn init_logging() {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SF_LOG").unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_ansi(is_tty)
        .with_writer(std::io::stderr)
        .init();
}
