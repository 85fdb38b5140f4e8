//! Optional value checks for the required parameters.

use super::ParameterSet;
use crate::error::{Result, SoplineError};

fn invalid(key: &str, reason: impl Into<String>) -> SoplineError {
    SoplineError::InvalidParameterValue {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn positive_integer(params: &ParameterSet, key: &str) -> Result<u64> {
    let raw = params.get(key).unwrap_or_default();
    match raw.parse::<u64>() {
        Ok(0) => Err(invalid(key, "must be greater than zero")),
        Ok(value) => Ok(value),
        Err(_) => Err(invalid(key, format!("'{raw}' is not a positive integer"))),
    }
}

fn list_len(params: &ParameterSet, key: &str) -> usize {
    params
        .get(key)
        .unwrap_or_default()
        .split(',')
        .filter(|item| !item.trim().is_empty())
        .count()
}

/// Check that required values are well formed.
///
/// Expects `require_all` to have passed; a missing key is reported as an
/// invalid (empty) value.
pub fn check_values(params: &ParameterSet) -> Result<()> {
    let min = positive_integer(params, "multiple_rarefactions:min")?;
    let max = positive_integer(params, "multiple_rarefactions:max")?;
    positive_integer(params, "multiple_rarefactions:step")?;
    positive_integer(params, "beta_diversity_through_plots:seqs_per_sample")?;

    if min > max {
        return Err(invalid(
            "multiple_rarefactions:min",
            format!("{min} is larger than multiple_rarefactions:max ({max})"),
        ));
    }

    let levels = list_len(params, "summarize_taxa:level");
    let labels = list_len(params, "plot_taxa_summary:labels");
    if levels == 0 {
        return Err(invalid("summarize_taxa:level", "no levels given"));
    }
    if levels != labels {
        return Err(invalid(
            "plot_taxa_summary:labels",
            format!("{labels} labels for {levels} summarize_taxa levels"),
        ));
    }

    if list_len(params, "alpha_diversity:metrics") == 0 {
        return Err(invalid("alpha_diversity:metrics", "no metrics given"));
    }

    Ok(())
}
