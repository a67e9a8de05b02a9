#![cfg(unix)]
#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::tempdir;

fn write_source(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn judge_cmd(scratch: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("judge").unwrap();
    cmd.arg("--scratch-dir").arg(scratch);
    cmd
}

#[test]
fn no_arguments_prints_usage_and_exits_one() {
    let mut cmd = Command::cargo_bin("judge").unwrap();
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("usage: judge"));
}

#[test]
fn clean_program_yields_success_record() {
    let work = tempdir().unwrap();
    let scratch = tempdir().unwrap();
    let source = write_source(work.path(), "ok.c", "int main(){return 0;}");

    judge_cmd(scratch.path())
        .arg(&source)
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""status":"Success""#)
                .and(predicate::str::contains(r#""job_id":1"#))
                .and(predicate::str::contains(r#""exit_code":0"#)),
        );
}

#[test]
fn captures_combined_stdout_and_stderr() {
    let work = tempdir().unwrap();
    let scratch = tempdir().unwrap();
    let source = write_source(
        work.path(),
        "chatty.c",
        "#include <stdio.h>\nint main(){printf(\"hi-stdout\\n\");fprintf(stderr,\"hi-stderr\\n\");return 0;}",
    );

    judge_cmd(scratch.path())
        .arg(&source)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("hi-stdout").and(predicate::str::contains("hi-stderr")),
        );
}

#[test]
fn banned_token_is_rejected_without_compiling() {
    let work = tempdir().unwrap();
    let scratch = tempdir().unwrap();
    let source = write_source(
        work.path(),
        "evil.c",
        "#include<stdlib.h>\nint main(){system(\"ls\");return 0;}",
    );

    judge_cmd(scratch.path())
        .arg(&source)
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""status":"Banned""#)
                .and(predicate::str::contains(r#""banned":true"#))
                .and(predicate::str::contains("system(")),
        );
}

#[test]
fn syntax_error_yields_compile_error() {
    let work = tempdir().unwrap();
    let scratch = tempdir().unwrap();
    let source = write_source(work.path(), "broken.c", "int main({");

    judge_cmd(scratch.path())
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status":"CompileError""#));
}

#[test]
fn segfaulting_program_yields_runtime_error_with_signal() {
    let work = tempdir().unwrap();
    let scratch = tempdir().unwrap();
    let source = write_source(
        work.path(),
        "crash.c",
        "int main(){int *p = 0; return *p;}",
    );

    judge_cmd(scratch.path())
        .arg(&source)
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""status":"RuntimeError""#)
                .and(predicate::str::contains(r#""signal":11"#)),
        );
}

#[test]
fn infinite_loop_is_killed_and_flagged_time_limit_exceeded() {
    let work = tempdir().unwrap();
    let scratch = tempdir().unwrap();
    let source = write_source(work.path(), "spin.c", "int main(){for(;;){}}");

    judge_cmd(scratch.path())
        .arg("--timeout-ms")
        .arg("300")
        .arg(&source)
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""status":"TimeLimitExceeded""#)
                .and(predicate::str::contains(r#""timed_out":true"#)),
        );
}

#[test]
fn multiple_submissions_get_ascending_job_ids() {
    let work = tempdir().unwrap();
    let scratch = tempdir().unwrap();
    let first = write_source(work.path(), "a.c", "int main(){return 0;}");
    let second = write_source(work.path(), "b.c", "int main(){return 1;}");

    let output = judge_cmd(scratch.path())
        .arg(&first)
        .arg(&second)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains(r#""job_id":1"#));
    assert!(text.contains(r#""job_id":2"#));
}
