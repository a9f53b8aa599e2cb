//! Shell-backed command runner.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use monostack_core::{
    application::{
        ports::{CommandRunner, ProcessOutput},
        ApplicationError,
    },
    error::MonostackResult,
};

/// How often the timeout path polls a still-running child.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Production command runner delegating to the platform shell.
///
/// Commands receive full shell interpretation (`sh -c` on Unix, `cmd /C` on
/// Windows), matching how catalog install commands are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run(
        &self,
        command: &str,
        cwd: &Path,
        timeout: Option<Duration>,
    ) -> MonostackResult<ProcessOutput> {
        debug!(command, cwd = %cwd.display(), "Running command");

        let mut builder = shell_command(command);
        builder
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = builder.spawn().map_err(|e| ApplicationError::CommandSpawnFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        match timeout {
            None => collect(command, child),
            Some(limit) => collect_with_timeout(command, child, limit),
        }
    }
}

fn shell_command(command: &str) -> Command {
    #[cfg(windows)]
    {
        let mut builder = Command::new("cmd");
        builder.args(["/C", command]);
        builder
    }
    #[cfg(not(windows))]
    {
        let mut builder = Command::new("sh");
        builder.args(["-c", command]);
        builder
    }
}

fn collect(command: &str, child: Child) -> MonostackResult<ProcessOutput> {
    let output = child
        .wait_with_output()
        .map_err(|e| ApplicationError::CommandSpawnFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    Ok(ProcessOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Wait for the child with a deadline.
///
/// The pipes are drained on background threads so a chatty child cannot
/// deadlock against a full pipe buffer while we poll `try_wait`.
fn collect_with_timeout(
    command: &str,
    mut child: Child,
    limit: Duration,
) -> MonostackResult<ProcessOutput> {
    let stdout_handle = child.stdout.take().map(spawn_reader);
    let stderr_handle = child.stderr.take().map(spawn_reader);
    let started = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return Ok(ProcessOutput {
                    exit_code: status.code().unwrap_or(-1),
                    stdout: join_reader(stdout_handle),
                    stderr: join_reader(stderr_handle),
                });
            }
            Ok(None) => {
                if started.elapsed() >= limit {
                    // Kill errors are ignored; the child may have just exited.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ApplicationError::CommandTimedOut {
                        command: command.to_string(),
                        seconds: limit.as_secs(),
                    }
                    .into());
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(ApplicationError::CommandSpawnFailed {
                    command: command.to_string(),
                    reason: e.to_string(),
                }
                .into());
            }
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use monostack_core::error::MonostackError;

    #[test]
    fn captures_stdout_and_exit_code() {
        let runner = ShellRunner::new();
        let out = runner.run("echo hello", Path::new("."), None).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn nonzero_exit_is_reported_not_an_error() {
        let runner = ShellRunner::new();
        let out = runner.run("exit 3", Path::new("."), None).unwrap();
        assert!(!out.success());
        assert_eq!(out.exit_code, 3);
    }

    #[test]
    fn stderr_is_captured() {
        let runner = ShellRunner::new();
        let out = runner.run("echo oops >&2; exit 1", Path::new("."), None).unwrap();
        assert_eq!(out.stderr.trim(), "oops");
    }

    #[test]
    fn runs_in_the_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ShellRunner::new();
        let out = runner.run("pwd", dir.path(), None).unwrap();
        let reported = std::fs::canonicalize(out.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn slow_command_times_out() {
        let runner = ShellRunner::new();
        let err = runner
            .run("sleep 5", Path::new("."), Some(Duration::from_millis(100)))
            .unwrap_err();
        assert!(matches!(
            err,
            MonostackError::Application(ApplicationError::CommandTimedOut { .. })
        ));
    }

    #[test]
    fn fast_command_beats_its_timeout() {
        let runner = ShellRunner::new();
        let out = runner
            .run("echo quick", Path::new("."), Some(Duration::from_secs(10)))
            .unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "quick");
    }
}
