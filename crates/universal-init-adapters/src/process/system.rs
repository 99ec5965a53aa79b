//! Runs package-manager commands with `std::process`.

use std::borrow::Cow;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::{debug, instrument, trace};

use universal_init_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::CommandLine,
    error::InitResult,
};

/// Production [`CommandRunner`].
///
/// Arguments go to the program as an argv vector, never through a shell.
/// stdout and stderr are captured: they are logged at debug level, and the
/// tail of stderr ends up in the error when the command fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(command = %command, cwd = %cwd.display()))]
    fn run(&self, command: &CommandLine, cwd: &Path) -> InitResult<()> {
        let output = Command::new(&*executable(command.program()))
            .args(command.arguments())
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::CommandFailed {
                command: command.to_string(),
                reason: format!("failed to execute: {e}"),
            })?;

        log_output(&output);

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map_or_else(|| "signal".to_owned(), |c| c.to_string());
            return Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                reason: format!("exit {code}: {}", stderr_tail(&output.stderr)),
            }
            .into());
        }

        debug!("command succeeded");
        Ok(())
    }

    #[instrument(skip_all, fields(command = %command))]
    fn probe(&self, command: &CommandLine) -> bool {
        let available = Command::new(&*executable(command.program()))
            .args(command.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success());
        debug!(available, "probe finished");
        available
    }
}

/// npm and yarn ship as `.cmd` shims on Windows, which `CreateProcess`
/// does not resolve on its own.
fn executable(program: &str) -> Cow<'_, str> {
    if cfg!(windows) && matches!(program, "npm" | "yarn") {
        Cow::Owned(format!("{program}.cmd"))
    } else {
        Cow::Borrowed(program)
    }
}

fn log_output(output: &Output) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stdout.trim().is_empty() {
        trace!(stdout = %stdout.trim_end(), "child stdout");
    }
    if !stderr.trim().is_empty() {
        debug!(stderr = %stderr.trim_end(), "child stderr");
    }
}

const STDERR_TAIL_LINES: usize = 5;

/// Last few non-empty stderr lines, joined.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return "no error output".into();
    }
    lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n")
}
