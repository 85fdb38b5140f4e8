//! Input validation and category selection scenarios.

use std::fs;

use sopline::commands::run::{execute, RunOptions};
use sopline::error::SoplineError;

use crate::helpers::{Fixture, MAPPING};

fn emit_options(fixture: &Fixture) -> RunOptions {
    RunOptions {
        commands_only: true,
        ..fixture.options()
    }
}

#[test]
fn test_unknown_category_is_omitted() {
    let fixture = Fixture::new();
    let opts = RunOptions {
        categories: Some("Treatment:Nonexistent".to_string()),
        ..emit_options(&fixture)
    };
    execute(opts).expect("unknown categories are not fatal");

    let script = fs::read_to_string(&fixture.outputs_starting_with("sopline_qiime18_")[0]).unwrap();
    assert!(!script.contains("Nonexistent"));
    assert!(!script.contains("Timepoint"));
    let core_lines = script
        .lines()
        .filter(|l| l.starts_with("compute_core_microbiome.py"))
        .count();
    assert_eq!(core_lines, 2);
}

#[test]
fn test_only_unknown_categories_leaves_category_free_stages() {
    let fixture = Fixture::new();
    let opts = RunOptions {
        categories: Some("Nonexistent".to_string()),
        ..emit_options(&fixture)
    };
    execute(opts).unwrap();

    let script = fs::read_to_string(&fixture.outputs_starting_with("sopline_qiime18_")[0]).unwrap();
    assert!(script.contains("print_biom_table_summary.py"));
    assert!(script.contains("alpha_rarefaction.py"));
    assert!(!script.contains("compute_core_microbiome.py"));
    assert!(!script.contains("compare_alpha_diversity.py"));
}

#[test]
fn test_missing_parameter_key_is_reported() {
    let params = "plot_taxa_summary:labels Phylum,Class\n\
                  alpha_diversity:metrics chao1,PD_whole_tree\n";
    let fixture = Fixture::with_files(MAPPING, params);

    let err = execute(emit_options(&fixture)).unwrap_err();
    match err.downcast_ref::<SoplineError>() {
        Some(SoplineError::MissingRequiredKey { key }) => {
            assert_eq!(key, "summarize_taxa:level");
        }
        other => panic!("expected MissingRequiredKey, got {other:?}"),
    }
    assert!(fixture.outputs_starting_with("sopline_").is_empty());
}

#[test]
fn test_ragged_mapping_is_rejected() {
    let mapping = "#SampleID\tTreatment\tTimepoint\n\
                   S1\tControl\tDay0\n\
                   S2\tDrug\n";
    let fixture = Fixture::with_files(mapping, &format!("{}\n", sopline::params::PARAMS_EXAMPLE));

    let err = execute(emit_options(&fixture)).unwrap_err();
    let ragged = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<SoplineError>())
        .expect("error chain should contain a SoplineError");
    assert!(
        matches!(ragged, SoplineError::RaggedRow { line: 3, .. }),
        "got {ragged:?}"
    );
}

#[test]
fn test_missing_input_file_is_rejected() {
    let fixture = Fixture::new();
    let opts = RunOptions {
        tree: fixture.inputs.join("missing.tre"),
        ..emit_options(&fixture)
    };
    let err = execute(opts).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_strict_params_rejects_bad_values() {
    let params = sopline::params::PARAMS_EXAMPLE.replace(
        "multiple_rarefactions:min 100",
        "multiple_rarefactions:min ten",
    );
    let fixture = Fixture::with_files(MAPPING, &params);

    // Lenient by default.
    execute(emit_options(&fixture)).expect("values are not checked by default");

    let opts = RunOptions {
        strict_params: true,
        ..emit_options(&fixture)
    };
    assert!(execute(opts).is_err());
}
