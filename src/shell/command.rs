//! External process execution.
//!
//! Package managers are launched directly (program + argument vector), never
//! through an intermediate shell, so package names reach the tool verbatim.

use crate::error::{ExitInfo, Result};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Describe how the command failed, or `None` if it succeeded.
    pub fn exit_info(&self) -> Option<ExitInfo> {
        if self.success {
            return None;
        }
        Some(match self.exit_code {
            Some(code) => ExitInfo::Code(code),
            None => ExitInfo::Terminated,
        })
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Pass all output straight through to the user's terminal.
    pub fn passthrough() -> Self {
        Self::default()
    }

    /// Capture both streams for inspection.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
        }
    }
}

/// Something that can launch external programs.
///
/// Production code uses [`SystemRunner`]; tests substitute a scripted runner
/// so no real package manager is ever started.
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it to finish.
    ///
    /// Returns `Err` only when the program could not be started.
    fn run(&self, program: &str, args: &[String], options: &CommandOptions)
        -> Result<CommandResult>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult> {
        execute(program, args, options)
    }
}

/// Execute a program and wait for it.
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    tracing::debug!("Running: {} {}", program, args.join(" "));

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(Stdio::inherit());

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    let output = cmd.output()?;
    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    tracing::debug!(
        "{} finished with {:?} after {:?}",
        program,
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn success_result_has_no_exit_info() {
        let result = CommandResult::success(String::new(), String::new(), Duration::ZERO);
        assert!(result.success);
        assert_eq!(result.exit_info(), None);
    }

    #[test]
    fn failure_result_reports_code() {
        let result =
            CommandResult::failure(Some(2), String::new(), String::new(), Duration::ZERO);
        assert_eq!(result.exit_info(), Some(ExitInfo::Code(2)));
    }

    #[test]
    fn failure_without_code_is_terminated() {
        let result = CommandResult::failure(None, String::new(), String::new(), Duration::ZERO);
        assert_eq!(result.exit_info(), Some(ExitInfo::Terminated));
    }

    #[test]
    fn captured_options_capture_both_streams() {
        let opts = CommandOptions::captured();
        assert!(opts.capture_stdout);
        assert!(opts.capture_stderr);
        let pass = CommandOptions::passthrough();
        assert!(!pass.capture_stdout);
        assert!(!pass.capture_stderr);
    }

    #[cfg(unix)]
    #[test]
    fn execute_captures_stdout() {
        let result = execute("sh", &args(&["-c", "echo hello"]), &CommandOptions::captured())
            .unwrap();
        assert!(result.success);
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn execute_reports_nonzero_exit() {
        let result =
            execute("sh", &args(&["-c", "exit 3"]), &CommandOptions::captured()).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_missing_program_is_error() {
        let result = execute(
            "devstation-definitely-not-a-program",
            &[],
            &CommandOptions::captured(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn system_runner_propagates_spawn_failure() {
        let runner = SystemRunner;
        let result = runner.run(
            "devstation-definitely-not-a-program",
            &[],
            &CommandOptions::passthrough(),
        );
        assert!(result.is_err());
    }
}
