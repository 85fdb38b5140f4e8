//! Sequential batch execution

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::time::Instant;
use tracing::{info, warn};

use super::config::{ExitPolicy, RunnerConfig};
use super::launcher::{with_activation, CommandLauncher};
use super::result::{CommandOutcome, RunReport, StageReport};
use crate::plan::{CommandBatch, StageBatch};
use crate::runlog::RunLog;

/// Run every command of `batch` in order, waiting for each before the next.
///
/// Stage directories are created right before a stage's first command. Each
/// stage is recorded in `log`. Exit statuses are handled according to
/// `config.exit_policy`; a command that cannot be spawned at all is an error
/// under every policy.
pub fn run_batch<L, W>(
    batch: &CommandBatch,
    launcher: &mut L,
    config: &RunnerConfig,
    log: &mut RunLog<W>,
) -> Result<RunReport>
where
    L: CommandLauncher,
    W: Write,
{
    let mut report = RunReport::default();

    for stage_batch in batch.stages() {
        let (stage_report, stopped) = run_stage(stage_batch, launcher, config, log)?;
        report.stages.push(stage_report);
        if stopped {
            report.aborted_at = Some(stage_batch.stage);
            break;
        }
    }

    Ok(report)
}

fn run_stage<L, W>(
    stage_batch: &StageBatch,
    launcher: &mut L,
    config: &RunnerConfig,
    log: &mut RunLog<W>,
) -> Result<(StageReport, bool)>
where
    L: CommandLauncher,
    W: Write,
{
    let stage = stage_batch.stage;
    let started = Instant::now();
    let timer = log.begin(stage.title())?;
    info!(stage = %stage, commands = stage_batch.len(), "starting stage");

    for dir in &stage_batch.directories {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    let mut report = StageReport::new(stage);
    let mut stopped = false;

    for command in &stage_batch.commands {
        let line = command.to_shell_line();
        log.command(&line)?;

        let full_line = with_activation(&line, config.activation.as_deref());
        let outcome = launcher
            .launch(&full_line, &config.working_dir)
            .with_context(|| format!("Failed to execute command: {line}"))?;

        if !outcome.success && config.exit_policy != ExitPolicy::Ignore {
            let reason = format!(
                "Command '{}' failed with exit code {:?}",
                command.program(),
                outcome.exit_code
            );
            warn!(stage = %stage, command = %line, exit_code = ?outcome.exit_code, "command failed");
            log.note(&format!("FAILED: {reason}"))?;
            report.failures.push(reason);
            if config.exit_policy == ExitPolicy::FailFast {
                stopped = true;
            }
        }

        report.outcomes.push(CommandOutcome {
            command: line,
            success: outcome.success,
            exit_code: outcome.exit_code,
            duration: outcome.duration,
        });

        if stopped {
            break;
        }
    }

    report.duration = started.elapsed();
    log.end(timer)?;
    Ok((report, stopped))
}
