//! Subprocess execution with a timeout

use super::GhError;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run `gh` with the given arguments and return its stdout
pub fn run_gh(args: &[String], timeout: Duration) -> Result<String, GhError> {
    run_command("gh", args, timeout).map_err(|e| match e {
        GhError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => GhError::NotInstalled,
        other => other,
    })
}

/// Run a program to completion, killing it once `timeout` elapses.
///
/// stdout and stderr are drained on their own threads so a chatty child
/// can't block on a full pipe while we poll for exit. A zero timeout
/// waits indefinitely.
pub fn run_command(program: &str, args: &[String], timeout: Duration) -> Result<String, GhError> {
    debug!("Running {} {:?}", program, args);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout_reader = child.stdout.take().map(|mut out| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = out.read_to_end(&mut buf);
            buf
        })
    });
    let stderr_reader = child.stderr.take().map(|mut err| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = err.read_to_end(&mut buf);
            buf
        })
    });

    let start = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if !timeout.is_zero() && start.elapsed() > timeout {
            let _ = child.kill();
            let _ = child.wait();
            warn!("{} timed out after {}s", program, timeout.as_secs());
            return Err(GhError::Timeout {
                program: program.to_string(),
                secs: timeout.as_secs(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stdout = stdout_reader
        .and_then(|h| h.join().ok())
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .unwrap_or_default();
    let stderr = stderr_reader
        .and_then(|h| h.join().ok())
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .unwrap_or_default();

    if !status.success() {
        return Err(GhError::Failed {
            program: program.to_string(),
            code: status.code().unwrap_or(-1),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(stdout)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_captures_stdout() {
        let out = run_command("sh", &sh("echo hello"), Duration::from_secs(10)).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn test_large_output_does_not_block() {
        // Well past a typical 64 KiB pipe buffer
        let out = run_command(
            "sh",
            &sh("i=0; while [ $i -lt 20000 ]; do echo 0123456789; i=$((i+1)); done"),
            Duration::from_secs(30),
        )
        .unwrap();
        assert_eq!(out.lines().count(), 20000);
    }

    #[test]
    fn test_nonzero_exit_reports_stderr() {
        let err = run_command("sh", &sh("echo boom >&2; exit 3"), Duration::from_secs(10))
            .unwrap_err();
        match err {
            GhError::Failed { code, stderr, .. } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_timeout_kills_child() {
        let start = Instant::now();
        let err = run_command("sh", &sh("sleep 5"), Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, GhError::Timeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_missing_program_is_io_not_found() {
        let err = run_command(
            "pr-ready-definitely-not-a-binary",
            &[],
            Duration::from_secs(1),
        )
        .unwrap_err();
        match err {
            GhError::Io(io) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other}"),
        }
    }
}
