//! Sandboxed C judge core: screens, compiles, and runs untrusted C
//! submissions under bounded resources, emitting one structured verdict
//! record per submission.

mod compiler;
mod config;
mod error;
mod queue;
mod sandbox;
mod screener;
mod scratch;
mod serializer;
mod sink;
mod submission;
mod supervisor;
mod verdict;
mod worker;

pub use config::{JudgeConfig, DEFAULT_CC_PROGRAM, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS};
pub use error::SetupError;
pub use sink::RecordSink;
pub use supervisor::run;
pub use verdict::{ExecResult, Status};
