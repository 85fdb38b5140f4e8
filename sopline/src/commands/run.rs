//! The `sopline` run: validate inputs, plan the SOP, then emit or execute it.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::error::SoplineError;
use crate::fs::WorkspaceRoot;
use crate::metadata::{resolve, CategorySelection, MetadataTable};
use crate::params::{self, ParameterSet, PARAMS_EXAMPLE};
use crate::plan::{AnalysisSettings, CommandBatch, CommandPlanner, PlanInputs};
use crate::runlog::RunLog;
use crate::runner::{run_batch, ExitPolicy, RunReport, RunnerConfig, ShellLauncher};
use crate::script::{write_script, ToolkitVersion};
use crate::toolkit::check_toolkit;
use crate::utils::{display_path, format_hms, timestamp};

/// Everything the command line can set for a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub biom: PathBuf,
    pub mapping: PathBuf,
    pub params: PathBuf,
    pub tree: PathBuf,
    /// Colon-separated category subset.
    pub categories: Option<String>,
    /// Write scripts only; run nothing.
    pub commands_only: bool,
    pub qiime17: Option<PathBuf>,
    pub qiime18: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub exit_policy: Option<ExitPolicy>,
    pub strict_params: bool,
}

/// Options after merging the config file under the command line.
#[derive(Debug, Clone)]
struct Resolved {
    qiime17: Option<PathBuf>,
    qiime18: Option<PathBuf>,
    exit_policy: ExitPolicy,
    settings: AnalysisSettings,
}

impl Resolved {
    fn merge(opts: &RunOptions, config: Config) -> Self {
        Self {
            qiime17: opts.qiime17.clone().or(config.toolkit.qiime17),
            qiime18: opts.qiime18.clone().or(config.toolkit.qiime18),
            exit_policy: opts
                .exit_policy
                .or(config.run.exit_policy)
                .unwrap_or_default(),
            settings: config.analysis,
        }
    }
}

/// Execute a run.
pub fn execute(opts: RunOptions) -> Result<()> {
    let workspace = WorkspaceRoot::new(&opts.output_dir)?;
    workspace.initialize()?;

    let config = Config::discover(opts.config.as_deref(), workspace.root())
        .context("Failed to load configuration")?;
    let resolved = Resolved::merge(&opts, config);

    let inputs = resolve_inputs(&opts)?;

    let table = MetadataTable::parse(&inputs.mapping)
        .with_context(|| format!("Failed to parse mapping file: {}", inputs.mapping.display()))?;
    let selection = select_categories(opts.categories.as_deref(), &table);

    let stamp = timestamp();
    if opts.commands_only {
        emit(&opts, &resolved, &inputs, &workspace, &selection, &table, stamp)
    } else {
        run(&opts, &resolved, &inputs, &workspace, &selection, &table, stamp)
    }
}

fn resolve_inputs(opts: &RunOptions) -> Result<PlanInputs> {
    Ok(PlanInputs {
        biom: absolute_input(&opts.biom, "BIOM table")?,
        mapping: absolute_input(&opts.mapping, "mapping file")?,
        params: absolute_input(&opts.params, "parameters file")?,
        tree: absolute_input(&opts.tree, "tree file")?,
    })
}

fn absolute_input(path: &Path, what: &str) -> Result<PathBuf> {
    if !path.is_file() {
        bail!("The {what} {} does not exist", path.display());
    }
    std::path::absolute(path).with_context(|| format!("Failed to resolve {}", path.display()))
}

fn select_categories(requested: Option<&str>, table: &MetadataTable) -> CategorySelection {
    let selection = resolve(requested, table);
    for rejected in selection.rejected() {
        eprintln!("  {} {}", "ERROR:".red().bold(), rejected);
    }
    info!(categories = ?selection.categories(), "resolved categories");
    selection
}

/// Validate the parameters file; a missing key ends the run with the example block.
fn validate_params(opts: &RunOptions) -> Result<ParameterSet> {
    let params = match params::validate(&opts.params) {
        Ok(params) => params,
        Err(err @ SoplineError::MissingRequiredKey { .. }) => {
            eprintln!("{} {err}\n", "✗".red().bold());
            eprintln!("I.E.:\n{PARAMS_EXAMPLE}\n");
            return Err(err.into());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read parameters file: {}", opts.params.display()))
        }
    };
    if opts.strict_params {
        params::check_values(&params)?;
    }
    Ok(params)
}

fn plan(
    resolved: &Resolved,
    inputs: &PlanInputs,
    workspace: &WorkspaceRoot,
    selection: &CategorySelection,
    table: &MetadataTable,
) -> (CommandBatch, Option<CommandBatch>) {
    let planner = CommandPlanner::new(inputs, workspace, resolved.settings);
    let batch = planner.plan(selection, table);
    let legacy = resolved
        .qiime17
        .as_ref()
        .map(|_| planner.plan_legacy(selection, table));
    (batch, legacy)
}

fn emit(
    opts: &RunOptions,
    resolved: &Resolved,
    inputs: &PlanInputs,
    workspace: &WorkspaceRoot,
    selection: &CategorySelection,
    table: &MetadataTable,
    stamp: i64,
) -> Result<()> {
    validate_params(opts)?;
    let (batch, legacy) = plan(resolved, inputs, workspace, selection, table);

    let main_script = write_script(
        workspace,
        ToolkitVersion::Qiime18,
        stamp,
        &batch,
        resolved.qiime18.as_deref(),
    )?;
    print_written(&main_script, batch.len(), workspace);

    if let Some(legacy) = legacy {
        let legacy_script = write_script(
            workspace,
            ToolkitVersion::Qiime17,
            stamp,
            &legacy,
            resolved.qiime17.as_deref(),
        )?;
        print_written(&legacy_script, legacy.len(), workspace);
    }

    Ok(())
}

fn print_written(path: &Path, commands: usize, workspace: &WorkspaceRoot) {
    println!(
        "  {} Wrote {} commands to {}",
        "✓".green().bold(),
        commands,
        display_path(path, workspace.root()).dimmed()
    );
}

fn run(
    opts: &RunOptions,
    resolved: &Resolved,
    inputs: &PlanInputs,
    workspace: &WorkspaceRoot,
    selection: &CategorySelection,
    table: &MetadataTable,
    stamp: i64,
) -> Result<()> {
    let mut log = RunLog::create(workspace, stamp)?;
    log.categories(selection.categories())?;

    let timer = log.begin("Validate Parameters")?;
    validate_params(opts)?;
    log.end(timer)?;

    let (batch, legacy) = plan(resolved, inputs, workspace, selection, table);

    let timer = log.begin("Check Toolkit")?;
    let checker_output = check_toolkit(resolved.qiime18.as_deref(), workspace.root())?;
    log.note(&checker_output)?;
    if legacy.is_some() {
        let legacy_output = check_toolkit(resolved.qiime17.as_deref(), workspace.root())
            .context("QIIME 1.7 activation script failed")?;
        log.note(&legacy_output)?;
    }
    log.end(timer)?;

    let mut launcher = ShellLauncher;
    let config = RunnerConfig::new(workspace.root().to_path_buf())
        .with_exit_policy(resolved.exit_policy)
        .with_activation(resolved.qiime18.clone());
    let mut report = run_batch(&batch, &mut launcher, &config, &mut log)?;

    if let Some(legacy) = legacy {
        if report.aborted_at.is_none() {
            let legacy_config = config.clone().with_activation(resolved.qiime17.clone());
            let legacy_report = run_batch(&legacy, &mut launcher, &legacy_config, &mut log)?;
            report.aborted_at = legacy_report.aborted_at;
            report.stages.extend(legacy_report.stages);
        }
    }

    print_report(&report);
    if let Some(path) = log.path() {
        println!(
            "  {} Run log {}",
            "→".cyan().bold(),
            display_path(path, workspace.root()).dimmed()
        );
    }

    if !report.all_passed() {
        let stages: Vec<&str> = report.failed_stages().map(|s| s.stage.title()).collect();
        bail!(
            "{} of {} commands failed ({})",
            report.failure_count(),
            report.command_count(),
            stages.join(", ")
        );
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    println!("\n{}", "Summary".bold());
    println!("{}", "─".repeat(40).dimmed());
    for stage in &report.stages {
        let marker = if stage.passed() {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        println!(
            "  {} {} ({} commands, {})",
            marker,
            stage.stage.title(),
            stage.outcomes.len(),
            format_hms(stage.duration).dimmed()
        );
        for failure in &stage.failures {
            println!("      {} {}", "!".yellow().bold(), failure);
        }
    }
    println!(
        "  {} {} commands in {}",
        "→".cyan().bold(),
        report.command_count(),
        format_hms(report.total_duration())
    );
    if let Some(stage) = report.aborted_at {
        println!(
            "  {} Stopped after {} (fail-fast)",
            "!".yellow().bold(),
            stage.title()
        );
    }
}
