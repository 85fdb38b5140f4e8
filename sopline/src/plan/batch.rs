use std::path::PathBuf;

use super::command::PlannedCommand;
use super::stage::Stage;

/// Commands of one stage and the directories they need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBatch {
    pub stage: Stage,
    pub directories: Vec<PathBuf>,
    pub commands: Vec<PlannedCommand>,
}

impl StageBatch {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Ordered commands of a run, grouped by stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBatch {
    stages: Vec<StageBatch>,
}

impl CommandBatch {
    pub fn push(&mut self, batch: StageBatch) {
        self.stages.push(batch);
    }

    pub fn stages(&self) -> &[StageBatch] {
        &self.stages
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageBatch> {
        self.stages.iter().find(|b| b.stage == stage)
    }

    /// Every command in emission order.
    pub fn commands(&self) -> impl Iterator<Item = &PlannedCommand> {
        self.stages.iter().flat_map(|b| b.commands.iter())
    }

    pub fn len(&self) -> usize {
        self.stages.iter().map(StageBatch::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
