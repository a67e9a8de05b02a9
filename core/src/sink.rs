use std::io::{self, Write};
use std::sync::Mutex;

use crate::serializer;
use crate::verdict::ExecResult;

/// Serializes and emits verdict records to a single underlying writer,
/// guarded by a mutex so workers writing concurrently never interleave a
/// record's bytes with another's.
///
/// The only primitive this exposes is `write_record`, which does its own
/// serialization internally; nothing outside this module builds a record's
/// bytes by hand.
pub struct RecordSink<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> RecordSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Serializes `result` for `job_id` and writes the record atomically
    /// with respect to other callers of this method.
    pub fn write_record(&self, job_id: i64, result: &ExecResult) -> io::Result<()> {
        let mut buffer = Vec::new();
        serializer::write_record(&mut buffer, job_id, result);

        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writer.write_all(&buffer)?;
        writer.flush()
    }

    /// Unwraps the sink, returning the underlying writer. Used by callers
    /// (and tests) that need to inspect or close the writer once every
    /// worker referencing this sink has shut down.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
