use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::JudgeConfig;
use crate::error::SetupError;
use crate::queue::JobQueue;
use crate::sink::RecordSink;
use crate::submission::Submission;
use crate::worker;

/// Judges every source path in `sources`, in order, emitting one record per
/// submission to `sink`. Returns once every worker has drained the queue and
/// shut down.
///
/// On start: creates the scratch directory, initializes the queue, spawns
/// `config.workers` worker threads, enqueues each submission with a
/// monotonically increasing job id starting at 1, then enqueues exactly
/// `config.workers` shutdown sentinels and waits for every worker to exit.
pub fn run<W: Write + Send + Sync + 'static>(
    sources: &[PathBuf],
    config: Arc<JudgeConfig>,
    sink: Arc<RecordSink<W>>,
) -> Result<(), SetupError> {
    std::fs::create_dir_all(&config.scratch_dir).map_err(SetupError::ScratchDir)?;

    let queue = Arc::new(JobQueue::new(config.queue_capacity));

    let pool_queue = Arc::clone(&queue);
    let pool_sink = Arc::clone(&sink);
    let pool_config = Arc::clone(&config);
    let pool = std::thread::spawn(move || {
        worker::run_pool(pool_queue, pool_sink, pool_config);
    });

    for (offset, source_path) in sources.iter().enumerate() {
        let job_id = offset as i64 + 1;
        tracing::debug!("enqueuing job {job_id}: {}", source_path.display());
        queue.enqueue(Submission::new(job_id, source_path.clone()));
    }
    for _ in 0..config.workers {
        queue.enqueue(Submission::shutdown());
    }

    if pool.join().is_err() {
        tracing::error!("worker pool thread panicked");
    }

    tracing::info!("judged {} submissions", sources.len());
    Ok(())
}
