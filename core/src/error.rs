use std::io;
use thiserror::Error;

/// Failures that can occur while reserving a unique scratch-area path before
/// a compile or a run. These are local to a single submission: every call
/// site that can produce one converts it into a verdict field rather than
/// letting it propagate out of the worker loop.
#[derive(Debug, Error)]
pub enum ScratchError {
    #[error("failed to reserve scratch path: {0}")]
    Reserve(#[source] io::Error),
}

/// Failures from driving the compiler subprocess, distinct from the
/// submission's own `CompileError` verdict: these are host/syscall-level
/// problems (couldn't reserve a path, couldn't spawn the compiler, couldn't
/// wait on it) rather than the compiler itself reporting a syntax error.
#[derive(Debug, Error)]
pub enum CompileDriverError {
    #[error(transparent)]
    Scratch(#[from] ScratchError),

    #[error("failed to spawn compiler: {0}")]
    Spawn(#[source] io::Error),

    #[error("failed to wait for compiler: {0}")]
    Wait(#[source] io::Error),
}

/// Infrastructure failures from the sandboxed runner itself (pipe/fork),
/// as opposed to anything the user program did. Per the error handling
/// design, these still resolve to a `RuntimeError` verdict rather than an
/// error that aborts the worker.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("failed to create output pipe: {0}")]
    Pipe(#[source] io::Error),

    #[error("failed to spawn sandboxed child: {0}")]
    Spawn(#[source] io::Error),
}

/// Process-boundary failures that prevent a run from starting at all
/// (scratch directory setup, queue initialization). These propagate out of
/// `main` as `anyhow::Error`, distinct from the per-submission verdict path.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to create scratch directory: {0}")]
    ScratchDir(#[source] io::Error),
}
