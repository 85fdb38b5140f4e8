//! Low-level process launching for planned commands

use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::{Result, SoplineError};

/// Exit information of one finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub success: bool,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub duration: Duration,
}

/// Starts a shell line and blocks until it exits.
///
/// Implementations must not return before the command has finished; the
/// batch runner relies on that to keep commands strictly sequential.
pub trait CommandLauncher {
    fn launch(&mut self, line: &str, working_dir: &Path) -> Result<LaunchOutcome>;
}

/// Runs commands through the system shell with inherited stdio, so toolkit
/// progress output reaches the terminal as it would from a script.
#[derive(Debug, Default)]
pub struct ShellLauncher;

impl CommandLauncher for ShellLauncher {
    fn launch(&mut self, line: &str, working_dir: &Path) -> Result<LaunchOutcome> {
        let start = Instant::now();
        let mut child = spawn_shell_command(line, working_dir)?;
        let status = child.wait().map_err(|source| SoplineError::Spawn {
            command: line.to_string(),
            source,
        })?;
        Ok(LaunchOutcome {
            success: status.success(),
            exit_code: status.code(),
            duration: start.elapsed(),
        })
    }
}

/// Spawn a shell command as a child process.
///
/// Uses `sh -c` on Unix and `cmd /C` on Windows. The command string is passed
/// as a single argument; quoting was already applied when it was rendered.
pub(crate) fn spawn_shell_command(line: &str, working_dir: &Path) -> Result<Child> {
    let mut cmd = if cfg!(target_family = "unix") {
        let mut c = Command::new("sh");
        c.arg("-c").arg(line);
        c
    } else {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(line);
        c
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .current_dir(working_dir);

    cmd.spawn().map_err(|source| SoplineError::Spawn {
        command: line.to_string(),
        source,
    })
}

/// Prefix a command line with sourcing of a toolkit activation script.
pub fn with_activation(line: &str, activation: Option<&Path>) -> String {
    match activation {
        Some(script) => {
            let script = script.display().to_string();
            let quoted = shell_escape::escape(script.as_str().into());
            format!(". {quoted} && {line}")
        }
        None => line.to_string(),
    }
}
