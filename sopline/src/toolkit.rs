//! Toolkit availability check.

use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::{Result, SoplineError};
use crate::runner::with_activation;

/// Program whose successful run shows the toolkit is installed and on `PATH`.
pub const CONFIG_CHECKER: &str = "print_qiime_config.py";

/// Check that the toolkit can be invoked, returning the checker's output.
pub fn check_toolkit(activation: Option<&Path>, working_dir: &Path) -> Result<String> {
    check_program(CONFIG_CHECKER, activation, working_dir)
}

/// Run `program` (after sourcing `activation`, if any) and require success.
///
/// Without an activation script the program must be found on `PATH` first, so
/// a missing toolkit is reported as such rather than as a shell error.
pub fn check_program(program: &str, activation: Option<&Path>, working_dir: &Path) -> Result<String> {
    if activation.is_none() && which::which(program).is_err() {
        return Err(SoplineError::ToolkitUnavailable(format!(
            "{program} is not on PATH. Load the toolkit or pass an activation script."
        )));
    }

    let line = with_activation(program, activation);
    debug!(command = %line, "checking toolkit");
    let output = Command::new("sh")
        .arg("-c")
        .arg(&line)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| SoplineError::Spawn {
            command: line.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SoplineError::ToolkitUnavailable(format!(
            "{program} exited with {:?}: {}",
            output.status.code(),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
