/// The closed set of verdict labels a submission can receive.
///
/// `Compiled` is a transient internal state used while the compiler driver
/// hands a binary path to the runner; it never appears on an emitted
/// record, where `status` is always one of the other five members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Banned,
    CompileError,
    Compiled,
    Success,
    RuntimeError,
    TimeLimitExceeded,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Banned => "Banned",
            Status::CompileError => "CompileError",
            Status::Compiled => "Compiled",
            Status::Success => "Success",
            Status::RuntimeError => "RuntimeError",
            Status::TimeLimitExceeded => "TimeLimitExceeded",
        }
    }
}

/// The verdict record for one submission, ready for serialization.
///
/// Invariants maintained by every code path that constructs one:
/// `banned ⇒ status == Banned`; `timed_out ⇒ status == TimeLimitExceeded`;
/// `status == Success ⇒ exit_code == 0 ∧ term_signal == 0 ∧ !timed_out`;
/// `compile_log` is empty unless `status` is `Banned` or `CompileError`.
#[derive(Debug, Clone)]
pub struct ExecResult {
    pub status: Status,
    pub output: Vec<u8>,
    pub compile_log: Vec<u8>,
    pub time_ms: u64,
    pub max_rss_kb: u64,
    pub exit_code: i32,
    pub term_signal: i32,
    pub timed_out: bool,
    pub banned: bool,
}

impl ExecResult {
    pub fn banned(token: &str) -> Self {
        Self {
            status: Status::Banned,
            output: Vec::new(),
            compile_log: format!("banned token found: {token}").into_bytes(),
            time_ms: 0,
            max_rss_kb: 0,
            exit_code: 0,
            term_signal: 0,
            timed_out: false,
            banned: true,
        }
    }

    /// The screener could not even open the source file. `banned` is
    /// defined as "true iff the screener rejected the source," which
    /// covers this path as well as an actual deny-list hit.
    pub fn screen_failed(message: String) -> Self {
        Self {
            status: Status::Banned,
            output: Vec::new(),
            compile_log: message.into_bytes(),
            time_ms: 0,
            max_rss_kb: 0,
            exit_code: 0,
            term_signal: 0,
            timed_out: false,
            banned: true,
        }
    }

    pub fn compile_error(log: Vec<u8>) -> Self {
        Self {
            status: Status::CompileError,
            output: Vec::new(),
            compile_log: log,
            time_ms: 0,
            max_rss_kb: 0,
            exit_code: 0,
            term_signal: 0,
            timed_out: false,
            banned: false,
        }
    }
}

/// Priority order for classifying a reaped child into a verdict, per the
/// sandboxed runner's classification table. `timed_out` outranks everything
/// else, even if the child happened to exit between the kill and the reap.
pub fn classify(
    timed_out: bool,
    term_signal: Option<i32>,
    exit_code: Option<i32>,
) -> (Status, i32, i32) {
    if timed_out {
        return (Status::TimeLimitExceeded, 0, 0);
    }
    if let Some(signal) = term_signal {
        return (Status::RuntimeError, 0, signal);
    }
    match exit_code {
        Some(0) => (Status::Success, 0, 0),
        Some(code) => (Status::RuntimeError, code, 0),
        None => (Status::RuntimeError, 0, 0),
    }
}
