use std::path::PathBuf;

use clap::Parser;

/// Compiles and runs untrusted C submissions under bounded resources,
/// emitting one structured verdict record per submission on stdout.
#[derive(Debug, Parser)]
#[command(name = "judge", author, version, about)]
pub struct Args {
    /// Source files to judge, in order. Assigned ascending job identifiers
    /// starting at 1.
    pub sources: Vec<PathBuf>,

    /// Number of worker threads in the pool.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Capacity of the bounded job queue.
    #[arg(long = "queue-capacity")]
    pub queue_capacity: Option<usize>,

    /// Wall-clock watchdog threshold, in milliseconds.
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,

    /// Root of the writable scratch area for transient binaries and
    /// compiler diagnostics. Defaults to a fresh temporary directory.
    #[arg(long = "scratch-dir")]
    pub scratch_dir: Option<PathBuf>,

    /// The system C compiler to invoke.
    #[arg(long)]
    pub cc: Option<String>,
}

impl Args {
    /// Parses from `std::env::args_os()`, bypassing clap's own "missing
    /// required argument" handling: with no positional sources this
    /// returns `None` rather than exiting with clap's usual code-2 error,
    /// so the caller can print the fixed usage line and exit with code 1
    /// instead. Any other malformed invocation (unknown flag, non-numeric
    /// value) still goes through clap's own error reporting and exit code.
    pub fn parse_or_usage() -> Option<Self> {
        let args = Self::parse();
        if args.sources.is_empty() {
            None
        } else {
            Some(args)
        }
    }
}
