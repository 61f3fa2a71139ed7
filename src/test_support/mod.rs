//! Test utilities and mocks for the compiler adapter unit tests.
//!
//! Detection and probing shell out to real compilers, which are not
//! installed on test machines. These mocks stand in for the process
//! runner, the compile probe and the companion cl.exe.
//!
//! # Example
//!
//! ```rust,ignore
//! use harbour_intel::test_support::{MockExecutor, MockProcessOutput};
//!
//! #[test]
//! fn test_example() {
//!     let exec = MockExecutor::new();
//!     exec.expect("icc --version", MockProcessOutput::success("icc (ICC) 19.0.1.144"));
//!
//!     // Hand `Arc::new(exec.clone())` to the code under test...
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use crate::compiler::{CompanionVersionSource, CompileProbe, ProbeOptions, ProbeResult};
use crate::error::CompilerResult;
use crate::util::process::{ProcessOutput, ProcessRunner};

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

impl From<MockProcessOutput> for ProcessOutput {
    fn from(mock: MockProcessOutput) -> Self {
        ProcessOutput {
            status: Some(mock.status),
            stdout: mock.stdout,
            stderr: mock.stderr,
        }
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
        }
    }
}

#[derive(Debug, Default)]
struct ExecutorState {
    expectations: Vec<(CommandPattern, MockProcessOutput)>,
    calls: Vec<String>,
}

/// Mock process runner.
///
/// Clones share state, so a test can keep one handle for assertions while
/// the code under test owns another. A command matching no expectation
/// fails the way a missing program would.
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
    state: Arc<Mutex<ExecutorState>>,
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, pattern: CommandPattern, output: MockProcessOutput) -> &Self {
        self.state
            .lock()
            .unwrap()
            .expectations
            .push((pattern, output));
        self
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::Exact(cmd.to_string()), output)
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&self, prefix: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::StartsWith(prefix.to_string()), output)
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&self, substring: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::Contains(substring.to_string()), output)
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl ProcessRunner for MockExecutor {
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput> {
        let full_cmd = if args.is_empty() {
            program.display().to_string()
        } else {
            format!("{} {}", program.display(), args.join(" "))
        };

        let mut state = self.state.lock().unwrap();
        state.calls.push(full_cmd.clone());

        // First registered match wins
        if let Some((_, output)) = state
            .expectations
            .iter()
            .find(|(pattern, _)| pattern.matches(&full_cmd))
        {
            return Ok(output.clone().into());
        }

        bail!("failed to spawn `{}`: unexpected command", full_cmd)
    }
}

/// Compile probe that records every request and reports success.
#[derive(Debug, Clone, Default)]
pub struct RecordingProbe {
    calls: Arc<Mutex<Vec<(String, ProbeOptions)>>>,
}

impl RecordingProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh probe nobody keeps a handle to.
    pub fn shared() -> Arc<dyn CompileProbe> {
        Self::new().into_shared()
    }

    pub fn into_shared(self) -> Arc<dyn CompileProbe> {
        Arc::new(self)
    }

    /// Code and options of every probe, in order.
    pub fn calls(&self) -> Vec<(String, ProbeOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CompileProbe for RecordingProbe {
    fn compiles(&self, code: &str, options: &ProbeOptions) -> Result<ProbeResult> {
        self.calls
            .lock()
            .unwrap()
            .push((code.to_string(), options.clone()));
        Ok(ProbeResult {
            success: true,
            cached: false,
        })
    }
}

/// Companion source reporting a fixed cl.exe version.
#[derive(Debug, Clone)]
pub struct FixedVersion {
    program: PathBuf,
    version: String,
}

impl FixedVersion {
    pub fn new(version: impl Into<String>) -> Self {
        FixedVersion {
            program: PathBuf::from("cl.exe"),
            version: version.into(),
        }
    }
}

impl CompanionVersionSource for FixedVersion {
    fn program(&self) -> &Path {
        &self.program
    }

    fn companion_version(&self) -> CompilerResult<String> {
        Ok(self.version.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_executor_matching() {
        let exec = MockExecutor::new();
        exec.expect("icc --version", MockProcessOutput::success("icc (ICC) 19.0.1"));
        exec.expect_prefix("icc -c", MockProcessOutput::failure(1, "error"));

        let out = exec
            .run(Path::new("icc"), &["--version".to_string()])
            .unwrap();
        assert!(out.success());
        assert!(out.stdout.contains("19.0.1"));

        let out = exec
            .run(Path::new("icc"), &["-c".to_string(), "x.c".to_string()])
            .unwrap();
        assert_eq!(out.status, Some(1));

        assert!(exec.run(Path::new("gcc"), &[]).is_err());
        assert_eq!(exec.calls(), vec!["icc --version", "icc -c x.c", "gcc"]);
    }

    #[test]
    fn test_mock_executor_clones_share_state() {
        let exec = MockExecutor::new();
        let handle = exec.clone();
        exec.expect_contains("--version", MockProcessOutput::success(""));

        handle.run(Path::new("icpc"), &["--version".to_string()]).unwrap();
        assert_eq!(exec.calls().len(), 1);
    }

    #[test]
    fn test_recording_probe() {
        let probe = RecordingProbe::new();
        let shared = probe.clone().into_shared();

        let result = shared.compiles("int x;", &ProbeOptions::default()).unwrap();
        assert!(result.success);
        assert_eq!(probe.calls()[0].0, "int x;");
    }
}
