use std::fmt;
use std::path::PathBuf;

use crate::fs::WorkspaceRoot;

/// One named phase of the analysis batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    BiomSummary,
    TaxaSummary,
    AlphaDiversity,
    AlphaComparison,
    BetaDiversity,
    BetaComparison,
    CoreMicrobiome,
    GroupSignificance,
    /// QIIME 1.7 `otu_category_significance.py` batch, planned on its own.
    LegacyCategorySignificance,
}

impl Stage {
    /// SOP stages in execution order.
    pub const SOP: [Stage; 8] = [
        Stage::BiomSummary,
        Stage::TaxaSummary,
        Stage::AlphaDiversity,
        Stage::AlphaComparison,
        Stage::BetaDiversity,
        Stage::BetaComparison,
        Stage::CoreMicrobiome,
        Stage::GroupSignificance,
    ];

    /// Heading used in run logs and emitted scripts.
    pub fn title(self) -> &'static str {
        match self {
            Stage::BiomSummary => "BIOM Table Summary",
            Stage::TaxaSummary => "Summarize Taxa",
            Stage::AlphaDiversity => "Alpha Diversity",
            Stage::AlphaComparison => "Compare Alpha Diversity",
            Stage::BetaDiversity => "Beta Diversity",
            Stage::BetaComparison => "Compare Beta Diversity",
            Stage::CoreMicrobiome => "Core Microbiome",
            Stage::GroupSignificance => "Group Significance",
            Stage::LegacyCategorySignificance => "OTU Category Significance",
        }
    }

    /// Directories that must exist before the stage's first command runs.
    ///
    /// Tool-owned output directories (`alpha_diversity/`, `beta_diversity/`)
    /// are left to the tools, which refuse to write into existing ones.
    pub fn directories(self, workspace: &WorkspaceRoot) -> Vec<PathBuf> {
        match self {
            Stage::TaxaSummary => vec![workspace.taxa_summary_dir()],
            Stage::AlphaComparison => vec![workspace.alpha_collated_dir()],
            Stage::CoreMicrobiome => vec![workspace.core_microbiome_dir()],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
