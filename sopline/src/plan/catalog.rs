//! Fixed catalogs crossed with the selected categories.

/// Collated alpha diversity metrics compared per category.
pub const ALPHA_METRICS: [&str; 5] = [
    "chao1",
    "observed_species",
    "PD_whole_tree",
    "shannon",
    "simpson",
];

/// `group_significance.py -s` tests run per category.
pub const GROUP_SIGNIFICANCE_TESTS: [&str; 7] = [
    "g_test",
    "kruskal_wallis",
    "ANOVA",
    "parametric_t_test",
    "nonparametric_t_test",
    "mann_whitney_u",
    "bootstrap_mann_whitney_u",
];

/// `otu_category_significance.py -s` tests for the QIIME 1.7 batch.
pub const LEGACY_CATEGORY_TESTS: [&str; 2] = ["g_test", "ANOVA"];

/// UniFrac weighting, in the order plots and ANOSIM comparisons are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    Unweighted,
    Weighted,
}

impl Weighting {
    pub const ALL: [Weighting; 2] = [Weighting::Unweighted, Weighting::Weighted];

    pub fn as_str(self) -> &'static str {
        match self {
            Weighting::Unweighted => "unweighted",
            Weighting::Weighted => "weighted",
        }
    }

    /// PCoA coordinates written by `beta_diversity_through_plots.py`.
    pub fn pcoa_file(self) -> String {
        format!("{}_unifrac_pc.txt", self.as_str())
    }

    /// Distance matrix written by `beta_diversity_through_plots.py`.
    pub fn distance_matrix_file(self) -> String {
        format!("{}_unifrac_dm.txt", self.as_str())
    }
}
