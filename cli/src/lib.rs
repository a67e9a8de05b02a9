mod cli;

pub use cli::Args;

use std::sync::Arc;

use judge_core::{JudgeConfig, RecordSink};

/// Builds a `JudgeConfig` from parsed CLI arguments, falling back to the
/// library's defaults for anything not overridden on the command line.
///
/// The scratch directory defaults to a fresh temporary directory per run
/// when `--scratch-dir` is not given.
pub fn build_config(args: &Args) -> anyhow::Result<JudgeConfig> {
    let scratch_dir = match &args.scratch_dir {
        Some(path) => path.clone(),
        None => tempfile::Builder::new()
            .prefix("judge-run-")
            .tempdir()?
            .into_path(),
    };

    let mut config = JudgeConfig::with_scratch_dir(scratch_dir);
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(queue_capacity) = args.queue_capacity {
        config.queue_capacity = queue_capacity;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(cc) = &args.cc {
        config.cc_program = cc.clone();
    }
    Ok(config)
}

/// Runs the full judging pipeline for `args`, writing verdict records to
/// stdout. Returns an error only for process-boundary failures (scratch
/// directory creation, queue initialization); per-submission failures are
/// always captured as verdict records instead.
pub fn run(args: Args) -> anyhow::Result<()> {
    let config = Arc::new(build_config(&args)?);
    let sink = Arc::new(RecordSink::new(std::io::stdout()));
    judge_core::run(&args.sources, config, sink)?;
    Ok(())
}
