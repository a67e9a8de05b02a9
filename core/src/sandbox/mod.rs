mod rlimit;

use std::ffi::c_void;
use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

use crate::config::JudgeConfig;
use crate::verdict::{classify, Status};

/// Raw result of running one transient binary under the watchdog, before
/// classification folds `timed_out`/`term_signal`/`exit_code` into a single
/// `Status`.
pub struct RunOutcome {
    pub status: Status,
    pub output: Vec<u8>,
    pub time_ms: u64,
    pub max_rss_kb: u64,
    pub exit_code: i32,
    pub term_signal: i32,
    pub timed_out: bool,
}

impl RunOutcome {
    fn infra_failure(message: String) -> Self {
        Self {
            status: Status::RuntimeError,
            output: message.into_bytes(),
            time_ms: 0,
            max_rss_kb: 0,
            exit_code: 0,
            term_signal: 0,
            timed_out: false,
        }
    }
}

/// Executes `binary_path` with no arguments under the resource and
/// wall-clock limits in `config`, merging stdout and stderr into a single
/// captured stream and classifying the outcome.
///
/// If the output pipe or the child itself cannot be created, there is no
/// child to reap: this returns a `RuntimeError` outcome carrying a
/// diagnostic message as its output, rather than panicking.
pub fn run(binary_path: &Path, config: &JudgeConfig) -> RunOutcome {
    let (read_fd, write_fd) = match make_pipe() {
        Ok(pair) => pair,
        Err(err) => {
            return RunOutcome::infra_failure(format!("failed to create output pipe: {err}"));
        }
    };

    let child_read_fd = read_fd.as_raw_fd();
    let child_write_fd = write_fd.as_raw_fd();
    let cpu_soft = config.cpu_soft_secs;
    let cpu_hard = config.cpu_hard_secs;
    let address_space = config.address_space_bytes;
    let file_size = config.file_size_bytes;

    let mut command = Command::new(binary_path);
    command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());

    // SAFETY: this closure runs in the forked child between `fork` and
    // `exec`. It only calls async-signal-safe functions (close, dup2,
    // setrlimit) and touches no Rust state shared with the parent.
    unsafe {
        command.pre_exec(move || {
            if libc::close(child_read_fd) == -1 {
                return Err(io::Error::last_os_error());
            }
            if libc::dup2(child_write_fd, libc::STDOUT_FILENO) == -1 {
                return Err(io::Error::last_os_error());
            }
            if libc::dup2(child_write_fd, libc::STDERR_FILENO) == -1 {
                return Err(io::Error::last_os_error());
            }
            if child_write_fd != libc::STDOUT_FILENO && child_write_fd != libc::STDERR_FILENO {
                libc::close(child_write_fd);
            }
            // Best-effort: a failure here is silently absorbed. The
            // watchdog below is the backstop that actually bounds the
            // child, so there is nothing useful to do with the error and
            // nothing async-signal-safe to log it to.
            rlimit::set_limit(rlimit::Resource::Cpu, cpu_soft, cpu_hard);
            rlimit::set_limit(rlimit::Resource::AddressSpace, address_space, address_space);
            rlimit::set_limit(rlimit::Resource::FileSize, file_size, file_size);
            Ok(())
        });
    }

    let spawned = command.spawn();
    drop(write_fd);

    let mut child = match spawned {
        Ok(child) => child,
        Err(err) => {
            return RunOutcome::infra_failure(format!("failed to spawn sandboxed child: {err}"));
        }
    };

    if let Err(err) = set_nonblocking(read_fd.as_raw_fd()) {
        // Reap to avoid leaving a zombie, then report the infra failure.
        let _ = child.kill();
        let _ = child.wait();
        return RunOutcome::infra_failure(format!("failed to configure output pipe: {err}"));
    }

    let pid = child.id() as libc::pid_t;
    let start = Instant::now();
    let mut output = Vec::new();
    let mut chunk = [0u8; 8192];
    let mut rusage: libc::rusage = unsafe { std::mem::zeroed() };
    let mut raw_status: libc::c_int = 0;
    let mut reaped = false;
    let mut timed_out = false;
    let output_limit = config.output_limit();

    loop {
        let wait_rc = unsafe { libc::wait4(pid, &mut raw_status, libc::WNOHANG, &mut rusage) };
        if wait_rc == pid {
            reaped = true;
            break;
        }

        let read_progress =
            read_available(read_fd.as_raw_fd(), &mut chunk, &mut output, output_limit);

        if start.elapsed().as_millis() as u64 >= config.timeout_ms {
            timed_out = true;
            unsafe {
                libc::kill(pid, libc::SIGKILL);
                libc::wait4(pid, &mut raw_status, 0, &mut rusage);
            }
            reaped = true;
            break;
        }

        if !read_progress {
            std::thread::sleep(std::time::Duration::from_millis(config.poll_interval_ms));
        }
    }

    // Drain whatever the child wrote between its last read and its exit.
    while read_available(read_fd.as_raw_fd(), &mut chunk, &mut output, output_limit) {}
    drop(read_fd);

    let time_ms = start.elapsed().as_millis() as u64;
    let max_rss_kb = if reaped { rusage.ru_maxrss.max(0) as u64 } else { 0 };

    let (term_signal, exit_code) = if reaped { decode_status(raw_status) } else { (None, None) };
    let (status, exit_code, term_signal) = classify(timed_out, term_signal, exit_code);

    RunOutcome { status, output, time_ms, max_rss_kb, exit_code, term_signal, timed_out }
}

fn make_pipe() -> io::Result<(OwnedFd, OwnedFd)> {
    let mut fds: [libc::c_int; 2] = [-1, -1];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } == -1 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: both descriptors were just returned by a successful `pipe(2)`
    // and are not owned anywhere else.
    let read_fd = unsafe { OwnedFd::from_raw_fd(fds[0]) };
    let write_fd = unsafe { OwnedFd::from_raw_fd(fds[1]) };
    Ok((read_fd, write_fd))
}

fn set_nonblocking(fd: RawFd) -> io::Result<()> {
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if flags == -1 {
        return Err(io::Error::last_os_error());
    }
    if unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Drains whatever is currently available on `fd` into `output`, respecting
/// `limit` (the maximum number of bytes retained — excess bytes are read and
/// discarded, not left buffered in the kernel, so the watchdog loop doesn't
/// stall on a child that keeps writing past the cap). Returns whether any
/// bytes were read this call, used to decide whether the poll loop should
/// sleep.
fn read_available(fd: RawFd, chunk: &mut [u8], output: &mut Vec<u8>, limit: usize) -> bool {
    let mut any = false;
    loop {
        let n = unsafe { libc::read(fd, chunk.as_mut_ptr() as *mut c_void, chunk.len()) };
        if n > 0 {
            any = true;
            let n = n as usize;
            if output.len() < limit {
                let take = (limit - output.len()).min(n);
                output.extend_from_slice(&chunk[..take]);
            }
            continue;
        }
        if n == 0 {
            break;
        }
        let err = io::Error::last_os_error();
        // Any error other than would-block (including a genuine read
        // error) is treated as end-of-stream for this poll iteration.
        let _ = err;
        break;
    }
    any
}

/// Decodes a raw `waitpid`/`wait4` status into `(term_signal, exit_code)`,
/// following the POSIX `WIFSIGNALED`/`WIFEXITED` convention: the low 7 bits
/// carry the terminating signal (0 and 0x7f are reserved for "exited" and
/// "stopped"), otherwise the exit code sits in bits 8-15.
fn decode_status(raw: libc::c_int) -> (Option<i32>, Option<i32>) {
    let low = raw & 0x7f;
    if low == 0 {
        (None, Some((raw >> 8) & 0xff))
    } else if low != 0x7f {
        (Some(low), None)
    } else {
        (None, None)
    }
}
