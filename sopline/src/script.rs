//! Shell script emission for a planned batch.

use anyhow::{Context, Result};
use shell_escape::escape;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::fs::WorkspaceRoot;
use crate::plan::CommandBatch;

/// Toolkit release a script targets; used in its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolkitVersion {
    Qiime17,
    Qiime18,
}

impl ToolkitVersion {
    pub fn tag(self) -> &'static str {
        match self {
            ToolkitVersion::Qiime17 => "qiime17",
            ToolkitVersion::Qiime18 => "qiime18",
        }
    }
}

fn quote(path: &Path) -> String {
    let text = path.display().to_string();
    escape(text.as_str().into()).into_owned()
}

/// Write the script text for `batch` to `out`.
///
/// Each stage gets a comment heading and `mkdir -p` lines for the
/// directories its commands write into, ahead of its first command.
pub fn render<W: Write>(
    out: &mut W,
    batch: &CommandBatch,
    activation: Option<&Path>,
) -> Result<()> {
    writeln!(out, "#!/bin/bash")?;
    if let Some(script) = activation {
        writeln!(out, ". {}", quote(script))?;
    }
    for stage_batch in batch.stages() {
        writeln!(out)?;
        writeln!(out, "# {}", stage_batch.stage.title())?;
        for dir in &stage_batch.directories {
            writeln!(out, "mkdir -p {}", quote(dir))?;
        }
        for command in &stage_batch.commands {
            writeln!(out, "{}", command.to_shell_line())?;
        }
    }
    Ok(())
}

/// Write `sopline_<tag>_<timestamp>.sh` into the workspace and make it
/// executable.
pub fn write_script(
    workspace: &WorkspaceRoot,
    version: ToolkitVersion,
    timestamp: i64,
    batch: &CommandBatch,
    activation: Option<&Path>,
) -> Result<PathBuf> {
    let path = workspace.join(format!("sopline_{}_{timestamp}.sh", version.tag()));

    let mut content = Vec::new();
    render(&mut content, batch, activation)?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write script: {}", path.display()))?;

    make_executable(&path)?;
    Ok(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .with_context(|| format!("Failed to get metadata for script: {}", path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
        .with_context(|| format!("Failed to set permissions on script: {}", path.display()))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
