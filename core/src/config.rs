use std::path::PathBuf;

/// Every tunable the supervisor, workers, and sandboxed runner need, built
/// once per process and shared read-only (`Arc`) by every worker thread.
///
/// Defaults match the values fixed by the component design; the CLI layer
/// is the only thing allowed to override them.
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Number of worker threads in the pool.
    pub workers: usize,
    /// Capacity of the bounded job queue.
    pub queue_capacity: usize,

    /// Ceiling on captured combined stdout+stderr, in bytes.
    pub output_ceiling: usize,
    /// Ceiling on captured compiler diagnostics, in bytes.
    pub compile_log_ceiling: usize,

    /// Wall-clock watchdog threshold, in milliseconds.
    pub timeout_ms: u64,
    /// Poll interval used by the watchdog loop while waiting on the child.
    pub poll_interval_ms: u64,

    /// Soft/hard CPU time limit applied to the sandboxed child, in seconds.
    pub cpu_soft_secs: u64,
    pub cpu_hard_secs: u64,
    /// Address-space limit applied to the sandboxed child, in bytes.
    pub address_space_bytes: u64,
    /// Maximum file size the sandboxed child may write, in bytes.
    pub file_size_bytes: u64,

    /// The system C compiler to invoke.
    pub cc_program: String,

    /// Root of the writable scratch area for transient binaries and
    /// compiler diagnostics.
    pub scratch_dir: PathBuf,
}

pub const DEFAULT_WORKERS: usize = 3;
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;
pub const DEFAULT_OUTPUT_CEILING: usize = 32 * 1024;
pub const DEFAULT_COMPILE_LOG_CEILING: usize = 8 * 1024;
pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;
pub const DEFAULT_CPU_SOFT_SECS: u64 = 2;
pub const DEFAULT_CPU_HARD_SECS: u64 = 3;
pub const DEFAULT_ADDRESS_SPACE_BYTES: u64 = 256 * 1024 * 1024;
pub const DEFAULT_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
pub const DEFAULT_CC_PROGRAM: &str = "cc";

impl JudgeConfig {
    /// A config using the defaults from the component design, rooted at the
    /// given scratch directory.
    pub fn with_scratch_dir(scratch_dir: PathBuf) -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            output_ceiling: DEFAULT_OUTPUT_CEILING,
            compile_log_ceiling: DEFAULT_COMPILE_LOG_CEILING,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            cpu_soft_secs: DEFAULT_CPU_SOFT_SECS,
            cpu_hard_secs: DEFAULT_CPU_HARD_SECS,
            address_space_bytes: DEFAULT_ADDRESS_SPACE_BYTES,
            file_size_bytes: DEFAULT_FILE_SIZE_BYTES,
            cc_program: DEFAULT_CC_PROGRAM.to_string(),
            scratch_dir,
        }
    }

    /// The maximum number of bytes of captured `output` actually retained.
    ///
    /// `output_ceiling` is the configured ceiling (32768 by default); the
    /// quantified invariant is `|output| ≤ ceiling - 1`, leaving room for the
    /// record's own terminator, so callers that truncate captured bytes use
    /// this value rather than `output_ceiling` directly.
    pub fn output_limit(&self) -> usize {
        self.output_ceiling.saturating_sub(1)
    }

    /// The maximum number of bytes of captured `compile_log` actually
    /// retained, analogous to [`Self::output_limit`].
    pub fn compile_log_limit(&self) -> usize {
        self.compile_log_ceiling.saturating_sub(1)
    }
}
