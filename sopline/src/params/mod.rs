//! Parameters file validation.
//!
//! A QIIME parameters file is line oriented: the first whitespace-separated
//! token of each line is a `section:field` key and the rest of the line is its
//! value. The SOP needs seven keys to be present; their values are passed
//! through to the toolkit untouched unless strict checking is requested.

mod strict;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Result, SoplineError};

pub use strict::check_values;

/// Keys the SOP commands rely on, in reporting order.
pub const REQUIRED_KEYS: [&str; 7] = [
    "summarize_taxa:level",
    "plot_taxa_summary:labels",
    "alpha_diversity:metrics",
    "multiple_rarefactions:min",
    "multiple_rarefactions:max",
    "multiple_rarefactions:step",
    "beta_diversity_through_plots:seqs_per_sample",
];

/// Example block printed when a required key is missing.
pub const PARAMS_EXAMPLE: &str = "\
summarize_taxa:level 2,3,4,5,6,7
plot_taxa_summary:labels Phylum,Class,Order,Family,Genus,Species
alpha_diversity:metrics shannon,simpson,PD_whole_tree,chao1,observed_species
multiple_rarefactions:min 100
multiple_rarefactions:max 18000
multiple_rarefactions:step 500
beta_diversity_through_plots:seqs_per_sample 18000";

/// Keys found in a parameters file with their raw values.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    values: HashMap<String, String>,
}

impl ParameterSet {
    /// Read every key of a parameters file without checking requirements.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut values = HashMap::new();
        for line in content.lines() {
            let line = line.trim_start();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = match line.split_once(char::is_whitespace) {
                Some((key, value)) => (key, value.trim()),
                None => (line, ""),
            };
            values
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
        Self { values }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Required keys absent from this set, in `REQUIRED_KEYS` order.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| !self.contains(key))
            .collect()
    }

    /// Fail on the first required key that is absent.
    pub fn require_all(&self) -> Result<()> {
        match self.missing_keys().first() {
            Some(key) => Err(SoplineError::MissingRequiredKey {
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Load a parameters file and check that every required key is present.
pub fn validate<P: AsRef<Path>>(path: P) -> Result<ParameterSet> {
    let params = ParameterSet::load(path)?;
    params.require_all()?;
    Ok(params)
}
