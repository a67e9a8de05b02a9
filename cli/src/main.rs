use std::process::ExitCode;

use judge_cli::Args;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: judge <source.c> [source.c ...] [--workers N] [--queue-capacity N] [--timeout-ms N] [--scratch-dir PATH] [--cc PROGRAM]";

fn main() -> ExitCode {
    init_tracing();

    let args = match Args::parse_or_usage() {
        Some(args) => args,
        None => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match judge_cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("judge: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
