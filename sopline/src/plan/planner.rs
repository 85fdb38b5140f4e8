//! Expansion of the SOP into toolkit command lines.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::batch::{CommandBatch, StageBatch};
use super::catalog::{ALPHA_METRICS, GROUP_SIGNIFICANCE_TESTS, LEGACY_CATEGORY_TESTS, Weighting};
use super::command::PlannedCommand;
use super::stage::Stage;
use crate::fs::WorkspaceRoot;
use crate::metadata::{CategorySelection, MetadataTable};
use crate::validation::validate_path_component;

/// Input files of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanInputs {
    pub biom: PathBuf,
    pub mapping: PathBuf,
    pub params: PathBuf,
    pub tree: PathBuf,
}

/// Tunables passed through to the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSettings {
    /// Permutations for `compare_alpha_diversity.py` and ANOSIM.
    pub permutations: u32,
    /// `--num_fraction_for_core_steps` of `compute_core_microbiome.py`.
    pub core_fraction_steps: u32,
    /// Parallel jobs for `alpha_rarefaction.py -O`.
    pub rarefaction_jobs: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            permutations: 9999,
            core_fraction_steps: 6,
            rarefaction_jobs: 24,
        }
    }
}

/// Builds the command batch for a set of inputs under a workspace root.
///
/// Planning has no side effects; directories a stage needs are recorded in
/// its `StageBatch` for the runner or script writer to create.
pub struct CommandPlanner<'a> {
    inputs: &'a PlanInputs,
    workspace: &'a WorkspaceRoot,
    settings: AnalysisSettings,
}

impl<'a> CommandPlanner<'a> {
    pub fn new(
        inputs: &'a PlanInputs,
        workspace: &'a WorkspaceRoot,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            inputs,
            workspace,
            settings,
        }
    }

    /// Expand every SOP stage in order.
    pub fn plan(&self, selection: &CategorySelection, table: &MetadataTable) -> CommandBatch {
        // Only categories backed by the table reach a command line.
        let categories: Vec<&str> = selection
            .categories()
            .iter()
            .map(String::as_str)
            .filter(|c| table.contains(c))
            .collect();

        let mut batch = CommandBatch::default();
        for stage in Stage::SOP {
            let commands = match stage {
                Stage::BiomSummary => self.biom_summary(),
                Stage::TaxaSummary => self.taxa_summary(&categories),
                Stage::AlphaDiversity => self.alpha_diversity(),
                Stage::AlphaComparison => self.alpha_comparison(&categories),
                Stage::BetaDiversity => self.beta_diversity(),
                Stage::BetaComparison => self.beta_comparison(&categories),
                Stage::CoreMicrobiome => self.core_microbiome(&categories, table),
                Stage::GroupSignificance => self.group_significance(&categories),
                Stage::LegacyCategorySignificance => continue,
            };
            batch.push(self.stage_batch(stage, commands));
        }
        batch
    }

    /// The QIIME 1.7 `otu_category_significance.py` batch.
    pub fn plan_legacy(&self, selection: &CategorySelection, table: &MetadataTable) -> CommandBatch {
        let mut commands = Vec::new();
        for category in selection.categories().iter().filter(|c| table.contains(c)) {
            for test in LEGACY_CATEGORY_TESTS {
                commands.push(
                    PlannedCommand::new("otu_category_significance.py")
                        .path_opt("-i", &self.inputs.biom)
                        .path_opt("-m", &self.inputs.mapping)
                        .opt("-c", category.as_str())
                        .opt("-s", test)
                        .path_opt("-o", &self.category_taxa_dir(category).join(format!("{test}.txt"))),
                );
            }
        }
        let mut batch = CommandBatch::default();
        batch.push(self.stage_batch(Stage::LegacyCategorySignificance, commands));
        batch
    }

    fn stage_batch(&self, stage: Stage, commands: Vec<PlannedCommand>) -> StageBatch {
        for command in &commands {
            debug!(stage = %stage, command = %command, "planned");
        }
        StageBatch {
            stage,
            directories: stage.directories(self.workspace),
            commands,
        }
    }

    fn category_taxa_dir(&self, category: &str) -> PathBuf {
        self.workspace
            .taxa_summary_dir()
            .join(format!("taxa_{category}"))
    }

    fn biom_summary(&self) -> Vec<PlannedCommand> {
        vec![PlannedCommand::new("print_biom_table_summary.py")
            .path_opt("-i", &self.inputs.biom)
            .path_opt("-o", &self.workspace.join("table_summary.txt"))]
    }

    fn taxa_summary(&self, categories: &[&str]) -> Vec<PlannedCommand> {
        let mut commands = vec![PlannedCommand::new("summarize_taxa_through_plots.py")
            .arg("-s")
            .path_opt("-i", &self.inputs.biom)
            .path_opt("-m", &self.inputs.mapping)
            .path_opt("-p", &self.inputs.params)
            .path_opt("-o", &self.workspace.taxa_summary_dir().join("taxa_individual"))];

        for category in categories {
            commands.push(
                PlannedCommand::new("summarize_taxa_through_plots.py")
                    .path_opt("-i", &self.inputs.biom)
                    .path_opt("-m", &self.inputs.mapping)
                    .path_opt("-p", &self.inputs.params)
                    .path_opt("-o", &self.category_taxa_dir(category))
                    .opt("-c", *category)
                    .arg("-s"),
            );
        }
        commands
    }

    fn alpha_diversity(&self) -> Vec<PlannedCommand> {
        vec![PlannedCommand::new("alpha_rarefaction.py")
            .path_opt("-i", &self.inputs.biom)
            .path_opt("-m", &self.inputs.mapping)
            .path_opt("-p", &self.inputs.params)
            .path_opt("-t", &self.inputs.tree)
            .arg("-a")
            .opt("-O", self.settings.rarefaction_jobs.to_string())
            .path_opt("-o", &self.workspace.alpha_diversity_dir())]
    }

    fn alpha_comparison(&self, categories: &[&str]) -> Vec<PlannedCommand> {
        let collated = self.workspace.alpha_collated_dir();
        let mut commands = Vec::with_capacity(ALPHA_METRICS.len() * categories.len());
        for metric in ALPHA_METRICS {
            for category in categories {
                commands.push(
                    PlannedCommand::new("compare_alpha_diversity.py")
                        .path_opt("-m", &self.inputs.mapping)
                        .opt("-n", self.settings.permutations.to_string())
                        .opt("-c", *category)
                        .path_opt("-i", &collated.join(format!("{metric}.txt")))
                        .path_opt("-o", &collated.join(format!("{metric}_{category}"))),
                );
            }
        }
        commands
    }

    fn beta_diversity(&self) -> Vec<PlannedCommand> {
        let beta = self.workspace.beta_diversity_dir();
        let mut commands = vec![PlannedCommand::new("beta_diversity_through_plots.py")
            .path_opt("-i", &self.inputs.biom)
            .path_opt("-m", &self.inputs.mapping)
            .path_opt("-t", &self.inputs.tree)
            .path_opt("-o", &beta)];

        for weighting in Weighting::ALL {
            commands.push(
                PlannedCommand::new("make_2d_plots.py")
                    .path_opt("-i", &beta.join(weighting.pcoa_file()))
                    .path_opt("-m", &self.inputs.mapping)
                    .path_opt(
                        "-o",
                        &beta.join(format!("2d_{}_unifrac_plots", weighting.as_str())),
                    ),
            );
        }
        commands
    }

    fn beta_comparison(&self, categories: &[&str]) -> Vec<PlannedCommand> {
        let beta = self.workspace.beta_diversity_dir();
        let mut commands = Vec::with_capacity(Weighting::ALL.len() * categories.len());
        for category in categories {
            for weighting in Weighting::ALL {
                commands.push(
                    PlannedCommand::new("compare_categories.py")
                        .opt("--method", "anosim")
                        .path_opt("-i", &beta.join(weighting.distance_matrix_file()))
                        .path_opt("-m", &self.inputs.mapping)
                        .opt("-c", *category)
                        .opt("-n", self.settings.permutations.to_string())
                        .path_opt(
                            "-o",
                            &beta.join(format!("ANOSIM_{category}_{}", weighting.as_str())),
                        ),
                );
            }
        }
        commands
    }

    fn core_microbiome(&self, categories: &[&str], table: &MetadataTable) -> Vec<PlannedCommand> {
        let core = self.workspace.core_microbiome_dir();
        let mut commands = Vec::new();
        for category in categories {
            let Some(states) = table.values(category) else {
                continue;
            };
            for state in states {
                if let Err(reason) = validate_path_component(state) {
                    warn!(
                        category = %category,
                        value = %state,
                        %reason,
                        "value cannot be used in an output path, skipping"
                    );
                    continue;
                }
                commands.push(
                    PlannedCommand::new("compute_core_microbiome.py")
                        .path_opt("-i", &self.inputs.biom)
                        .path_opt("--mapping_fp", &self.inputs.mapping)
                        .opt(
                            "--num_fraction_for_core_steps",
                            self.settings.core_fraction_steps.to_string(),
                        )
                        .path_opt("-o", &core.join(format!("core_microbiome_{category}_{state}")))
                        .opt("--valid_states", format!("{category}:{state}")),
                );
            }
        }
        commands
    }

    fn group_significance(&self, categories: &[&str]) -> Vec<PlannedCommand> {
        let mut commands = Vec::with_capacity(GROUP_SIGNIFICANCE_TESTS.len() * categories.len());
        for test in GROUP_SIGNIFICANCE_TESTS {
            for category in categories {
                commands.push(
                    PlannedCommand::new("group_significance.py")
                        .path_opt("-i", &self.inputs.biom)
                        .path_opt("-m", &self.inputs.mapping)
                        .opt("-c", *category)
                        .opt("-s", test)
                        .path_opt(
                            "-o",
                            &self.category_taxa_dir(category).join(format!("{test}.txt")),
                        ),
                );
            }
        }
        commands
    }
}
