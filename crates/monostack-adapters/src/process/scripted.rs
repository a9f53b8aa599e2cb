//! Scripted command runner for testing.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use monostack_core::{
    application::ports::{CommandRunner, ProcessOutput},
    error::MonostackResult,
};

/// One recorded call to the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub cwd: PathBuf,
}

/// Test runner that matches commands against configured outcomes instead of
/// spawning processes.
///
/// Outcomes are matched by substring, first match wins; unmatched commands
/// succeed with empty output. Every call is recorded, so tests can assert
/// both what ran and in which directory.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    outcomes: Arc<Mutex<Vec<(String, ProcessOutput)>>>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure any command containing `needle` to produce `output`.
    pub fn on(self, needle: impl Into<String>, output: ProcessOutput) -> Self {
        self.outcomes
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push((needle.into(), output));
        self
    }

    /// Configure any command containing `needle` to fail with the given
    /// exit code and stderr text.
    pub fn failing_on(self, needle: impl Into<String>, exit_code: i32, stderr: &str) -> Self {
        self.on(
            needle,
            ProcessOutput {
                exit_code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        )
    }

    /// All recorded invocations, in call order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Commands only, for terser assertions.
    pub fn commands(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .map(|i| i.command)
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(
        &self,
        command: &str,
        cwd: &Path,
        _timeout: Option<Duration>,
    ) -> MonostackResult<ProcessOutput> {
        self.invocations
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(Invocation {
                command: command.to_string(),
                cwd: cwd.to_path_buf(),
            });

        let outcomes = self.outcomes.lock().unwrap_or_else(|p| p.into_inner());
        for (needle, output) in outcomes.iter() {
            if command.contains(needle.as_str()) {
                return Ok(output.clone());
            }
        }
        Ok(ProcessOutput::ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_commands_succeed() {
        let runner = ScriptedRunner::new();
        let out = runner.run("git init", Path::new("/proj"), None).unwrap();
        assert!(out.success());
    }

    #[test]
    fn first_matching_outcome_wins() {
        let runner = ScriptedRunner::new()
            .failing_on("npm", 1, "network down")
            .on(
                "npm install",
                ProcessOutput {
                    exit_code: 0,
                    stdout: "never reached".into(),
                    stderr: String::new(),
                },
            );

        let out = runner.run("npm install", Path::new("."), None).unwrap();
        assert_eq!(out.exit_code, 1);
        assert_eq!(out.stderr, "network down");
    }

    #[test]
    fn records_commands_and_directories() {
        let runner = ScriptedRunner::new();
        runner.run("git init", Path::new("/proj"), None).unwrap();
        runner
            .run("python3 -m venv venv", Path::new("/proj/backend"), None)
            .unwrap();

        assert_eq!(runner.commands(), vec!["git init", "python3 -m venv venv"]);
        assert_eq!(runner.invocations()[1].cwd, PathBuf::from("/proj/backend"));
    }

    #[test]
    fn clones_share_recordings() {
        let runner = ScriptedRunner::new();
        let handle = runner.clone();
        runner.run("git init", Path::new("."), None).unwrap();
        assert_eq!(handle.commands(), vec!["git init"]);
    }
}
