use std::io::Write;
use std::sync::Arc;

use crate::compiler;
use crate::config::JudgeConfig;
use crate::queue::JobQueue;
use crate::sandbox;
use crate::screener::{self, ScreenOutcome};
use crate::scratch;
use crate::sink::RecordSink;
use crate::verdict::ExecResult;

/// Runs one worker's dequeue loop until it dequeues the shutdown sentinel.
///
/// Per submission: screen → compile → (on success) run → unlink the
/// transient binary → serialize the verdict → emit it to the shared sink.
/// A failure at any stage before the run step short-circuits straight to
/// emission; it never aborts the worker itself, since per-submission
/// failures are confined to that submission's verdict record.
pub fn run_worker<W: Write + Send>(
    queue: &JobQueue,
    sink: &RecordSink<W>,
    config: &JudgeConfig,
) {
    loop {
        let submission = queue.dequeue();
        if submission.is_shutdown() {
            return;
        }

        let result = judge(&submission.source_path, config);
        if let Err(err) = sink.write_record(submission.job_id, &result) {
            tracing::error!(
                "failed to emit verdict record for job {}: {err}",
                submission.job_id
            );
        }
    }
}

/// Spawns `config.workers` worker threads sharing `queue` and `sink`, and
/// blocks until all of them have returned (i.e. all have dequeued a
/// shutdown sentinel).
pub fn run_pool<W: Write + Send + Sync + 'static>(
    queue: Arc<JobQueue>,
    sink: Arc<RecordSink<W>>,
    config: Arc<JudgeConfig>,
) {
    let mut handles = Vec::with_capacity(config.workers);
    for index in 0..config.workers {
        let queue = Arc::clone(&queue);
        let sink = Arc::clone(&sink);
        let config = Arc::clone(&config);
        let spawned = std::thread::Builder::new()
            .name(format!("judge-worker-{index}"))
            .spawn(move || run_worker(&queue, &sink, &config));
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(err) => {
                // One fewer live consumer still drains correctly: the
                // remaining workers dequeue every submission, and the
                // sentinel meant for this worker is simply left unread.
                tracing::error!("failed to spawn worker thread {index}: {err}");
            }
        }
    }
    for handle in handles {
        if handle.join().is_err() {
            tracing::error!("a worker thread panicked");
        }
    }
}

fn judge(source_path: &std::path::Path, config: &JudgeConfig) -> ExecResult {
    match screener::screen(source_path) {
        ScreenOutcome::Banned { token } => return ExecResult::banned(token),
        ScreenOutcome::OpenFailed { message } => return ExecResult::screen_failed(message),
        ScreenOutcome::Passed => {}
    }

    let binary_path = match compiler::compile(source_path, config) {
        Ok(path) => path,
        Err(result) => return result,
    };

    let outcome = sandbox::run(&binary_path, config);
    scratch::remove_best_effort(&binary_path);

    ExecResult {
        status: outcome.status,
        output: outcome.output,
        compile_log: Vec::new(),
        time_ms: outcome.time_ms,
        max_rss_kb: outcome.max_rss_kb,
        exit_code: outcome.exit_code,
        term_signal: outcome.term_signal,
        timed_out: outcome.timed_out,
        banned: false,
    }
}
