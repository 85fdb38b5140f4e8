use anyhow::Result;
use clap::Parser;
use sopline::commands::run::{self, RunOptions};
use sopline::runner::ExitPolicy;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HELP_TEMPLATE: &str = "
  ┌─┐┌─┐┌─┐┬  ┬┌┐┌┌─┐
  └─┐│ │├─┘│  ││││├┤
  └─┘└─┘┴  ┴─┘┴┘└┘└─┘

{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}";

#[derive(Parser)]
#[command(name = "sopline")]
#[command(about = "Run the QIIME secondary analysis SOP on a BIOM table", long_about = None)]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
struct Cli {
    /// The BIOM file
    #[arg(short, long)]
    biom: PathBuf,

    /// The mapping file
    #[arg(short, long = "map")]
    map: PathBuf,

    /// The parameters file
    #[arg(short, long)]
    params: PathBuf,

    /// The tree file
    #[arg(short, long = "tre")]
    tre: PathBuf,

    /// Metadata categories to analyse, colon separated (default: all)
    #[arg(short, long)]
    categories: Option<String>,

    /// Only write the command scripts; do not run anything
    #[arg(long)]
    commands: bool,

    /// QIIME 1.7 activation script (adds the OTU category significance batch)
    #[arg(long)]
    qiime17: Option<PathBuf>,

    /// QIIME 1.8 activation script, sourced before every SOP command
    #[arg(long)]
    qiime18: Option<PathBuf>,

    /// Directory all outputs are written under
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Config file (default: sopline.toml in the output directory, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// How command exit statuses are handled: ignore, collect or fail-fast
    #[arg(long)]
    exit_policy: Option<ExitPolicy>,

    /// Also check that parameter values are well formed
    #[arg(long)]
    strict_params: bool,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run::execute(RunOptions {
        biom: cli.biom,
        mapping: cli.map,
        params: cli.params,
        tree: cli.tre,
        categories: cli.categories,
        commands_only: cli.commands,
        qiime17: cli.qiime17,
        qiime18: cli.qiime18,
        output_dir: cli.output_dir,
        config: cli.config,
        exit_policy: cli.exit_policy,
        strict_params: cli.strict_params,
    })
}
