use std::io;
use std::path::{Path, PathBuf};

use tempfile::Builder;

use crate::error::ScratchError;

/// Reserves a unique path inside `dir` with the given filename prefix and
/// immediately frees the name again (create-then-unlink), so the caller
/// gets a collision-free path with nothing at it. Used both for the
/// transient binary's destination and for a job's private compiler-log
/// capture file, so concurrent workers never share a scratch path.
pub fn reserve_unique_path(dir: &Path, prefix: &str) -> Result<PathBuf, ScratchError> {
    let temp = Builder::new()
        .prefix(prefix)
        .tempfile_in(dir)
        .map_err(ScratchError::Reserve)?;
    let path = temp.path().to_path_buf();
    temp.close().map_err(ScratchError::Reserve)?;
    Ok(path)
}

/// Reads `path` into memory and truncates to `ceiling` bytes. Used for the
/// compiler's stderr capture file. A missing or empty file yields the fixed
/// "no log" placeholder rather than an error, per the compiler driver's
/// error conditions.
pub fn read_capped(path: &Path, ceiling: usize) -> Vec<u8> {
    match std::fs::read(path) {
        Ok(mut bytes) if !bytes.is_empty() => {
            bytes.truncate(ceiling);
            bytes
        }
        _ => b"(no compiler output captured)".to_vec(),
    }
}

/// Best-effort removal; the caller has already emitted whatever verdict it
/// needed, so a failure here is not otherwise actionable.
pub fn remove_best_effort(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        if err.kind() != io::ErrorKind::NotFound {
            tracing::warn!("failed to remove scratch file {}: {err}", path.display());
        }
    }
}
