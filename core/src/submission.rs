use std::path::PathBuf;

/// Reserved job identifier used for the in-band shutdown sentinel. Real job
/// identifiers are assigned starting at 1, so this value can never collide
/// with one.
pub const SHUTDOWN_JOB_ID: i64 = -1;

/// One unit of work handed from the supervisor to a worker: a source file to
/// judge, tagged with the identifier that ties its eventual verdict back to
/// the caller's input order.
#[derive(Debug, Clone)]
pub struct Submission {
    pub job_id: i64,
    pub source_path: PathBuf,
}

impl Submission {
    pub fn new(job_id: i64, source_path: PathBuf) -> Self {
        Self {
            job_id,
            source_path,
        }
    }

    /// A sentinel submission enqueued once per worker to signal shutdown.
    /// Workers recognize it by job id alone; the path is never read.
    pub fn shutdown() -> Self {
        Self {
            job_id: SHUTDOWN_JOB_ID,
            source_path: PathBuf::new(),
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.job_id == SHUTDOWN_JOB_ID
    }
}
