use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::JudgeConfig;
use crate::scratch;
use crate::verdict::ExecResult;

/// Drives the system C compiler over `source_path`, producing a transient
/// binary. On success, returns the path to the (not-yet-executed) binary.
/// On any failure — reservation, spawn, or the compiler itself reporting an
/// error — returns a fully-formed `CompileError` verdict ready to emit.
pub fn compile(source_path: &Path, config: &JudgeConfig) -> Result<PathBuf, ExecResult> {
    let binary_path = match scratch::reserve_unique_path(&config.scratch_dir, "judge-bin-") {
        Ok(path) => path,
        Err(err) => {
            return Err(ExecResult::compile_error(
                format!("failed to reserve output path: {err}").into_bytes(),
            ));
        }
    };
    let log_path = match scratch::reserve_unique_path(&config.scratch_dir, "judge-log-") {
        Ok(path) => path,
        Err(err) => {
            scratch::remove_best_effort(&binary_path);
            return Err(ExecResult::compile_error(
                format!("failed to reserve log path: {err}").into_bytes(),
            ));
        }
    };

    let log_file = match File::create(&log_path) {
        Ok(file) => file,
        Err(err) => {
            return Err(ExecResult::compile_error(
                format!("failed to create compiler log file: {err}").into_bytes(),
            ));
        }
    };

    let spawned = Command::new(&config.cc_program)
        .arg("-std=c11")
        .arg("-O2")
        .arg(source_path)
        .arg("-o")
        .arg(&binary_path)
        .arg("-lm")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::from(log_file))
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(err) => {
            scratch::remove_best_effort(&log_path);
            return Err(ExecResult::compile_error(
                format!("failed to spawn compiler: {err}").into_bytes(),
            ));
        }
    };

    let status = match child.wait() {
        Ok(status) => status,
        Err(err) => {
            scratch::remove_best_effort(&log_path);
            return Err(ExecResult::compile_error(
                format!("failed to wait for compiler: {err}").into_bytes(),
            ));
        }
    };

    if status.success() {
        scratch::remove_best_effort(&log_path);
        Ok(binary_path)
    } else {
        let log = scratch::read_capped(&log_path, config.compile_log_limit());
        scratch::remove_best_effort(&log_path);
        scratch::remove_best_effort(&binary_path);
        Err(ExecResult::compile_error(log))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::verdict::Status;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_in(dir: &Path) -> JudgeConfig {
        JudgeConfig::with_scratch_dir(dir.to_path_buf())
    }

    fn write_source(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".c").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn successful_compile_produces_binary_path() {
        let scratch = tempfile::tempdir().unwrap();
        let source = write_source("int main(){return 0;}");
        let config = config_in(scratch.path());

        match compile(source.path(), &config) {
            Ok(binary_path) => {
                assert!(binary_path.exists());
                std::fs::remove_file(binary_path).ok();
            }
            Err(result) => panic!("expected successful compile, got {result:?}"),
        }
    }

    #[test]
    fn syntax_error_yields_compile_error_with_log() {
        let scratch = tempfile::tempdir().unwrap();
        let source = write_source("int main({");
        let config = config_in(scratch.path());

        match compile(source.path(), &config) {
            Ok(_) => panic!("expected a CompileError"),
            Err(result) => {
                assert_eq!(result.status, Status::CompileError);
                assert!(!result.compile_log.is_empty());
            }
        }
    }
}
