//! Timestamped run log.
//!
//! Each step of a run is recorded as its name and wall-clock start time, the
//! command lines it issued, and its elapsed time. The log is flushed after
//! every step so a crashed run still shows how far it got.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::fs::WorkspaceRoot;
use crate::utils::format_hms;

/// Start of a logged step.
#[derive(Debug)]
pub struct StepTimer {
    started: Instant,
}

pub struct RunLog<W: Write> {
    writer: W,
    path: Option<PathBuf>,
}

impl RunLog<BufWriter<File>> {
    /// Create `secondary_batch_<timestamp>.log` in the workspace root.
    pub fn create(workspace: &WorkspaceRoot, timestamp: i64) -> Result<Self> {
        let path = workspace.join(format!("secondary_batch_{timestamp}.log"));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create run log: {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: Some(path),
        })
    }
}

impl<W: Write> RunLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn categories(&mut self, categories: &[String]) -> Result<()> {
        writeln!(self.writer, "Categories: {}", categories.join(", "))?;
        self.writer.flush()?;
        Ok(())
    }

    /// Record the step name and the current local time.
    pub fn begin(&mut self, name: &str) -> Result<StepTimer> {
        let now = Local::now().format("%a %b %e %H:%M:%S %Y");
        writeln!(self.writer, "{name}\t{now}")?;
        Ok(StepTimer {
            started: Instant::now(),
        })
    }

    pub fn command(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    /// Free-form line, e.g. a failure notice or tool output.
    pub fn note(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text.trim_end())?;
        Ok(())
    }

    pub fn end(&mut self, timer: StepTimer) -> Result<()> {
        writeln!(
            self.writer,
            "Elapsed {}\n",
            format_hms(timer.started.elapsed())
        )?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
