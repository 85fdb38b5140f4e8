//! Result types for batch execution

use std::time::Duration;

use crate::plan::Stage;

/// Result of running one planned command.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub command: String,
    pub success: bool,
    pub exit_code: Option<i32>,
    pub duration: Duration,
}

/// Commands run for one stage and the ones that failed.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub outcomes: Vec<CommandOutcome>,
    /// Failure messages; always empty under `ExitPolicy::Ignore`.
    pub failures: Vec<String>,
    pub duration: Duration,
}

impl StageReport {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            outcomes: Vec::new(),
            failures: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub stages: Vec<StageReport>,
    /// Stage at which a fail-fast run stopped.
    pub aborted_at: Option<Stage>,
}

impl RunReport {
    pub fn all_passed(&self) -> bool {
        self.aborted_at.is_none() && self.stages.iter().all(StageReport::passed)
    }

    pub fn failed_stages(&self) -> impl Iterator<Item = &StageReport> {
        self.stages.iter().filter(|s| !s.passed())
    }

    pub fn command_count(&self) -> usize {
        self.stages.iter().map(|s| s.outcomes.len()).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.stages.iter().map(|s| s.failures.len()).sum()
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }
}
