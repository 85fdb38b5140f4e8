//! Command-emission mode: scripts are written, nothing is executed.

use std::fs;
use std::os::unix::fs::PermissionsExt;

use sopline::commands::run::execute;

use crate::helpers::Fixture;

#[test]
fn test_emit_writes_executable_script() {
    let fixture = Fixture::new();
    let opts = sopline::commands::run::RunOptions {
        commands_only: true,
        ..fixture.options()
    };

    execute(opts).expect("emit should succeed");

    let scripts = fixture.outputs_starting_with("sopline_qiime18_");
    assert_eq!(scripts.len(), 1, "expected exactly one script");
    let mode = fs::metadata(&scripts[0]).unwrap().permissions().mode();
    assert_eq!(mode & 0o111, 0o111, "script should be executable");

    let script = fs::read_to_string(&scripts[0]).unwrap();
    assert!(script.starts_with("#!/bin/bash\n"));
    let headings: Vec<&str> = script.lines().filter(|l| l.starts_with("# ")).collect();
    assert_eq!(
        headings,
        vec![
            "# BIOM Table Summary",
            "# Summarize Taxa",
            "# Alpha Diversity",
            "# Compare Alpha Diversity",
            "# Beta Diversity",
            "# Compare Beta Diversity",
            "# Core Microbiome",
            "# Group Significance",
        ]
    );

    let core_lines = script
        .lines()
        .filter(|l| l.starts_with("compute_core_microbiome.py"))
        .count();
    assert_eq!(core_lines, 5, "2 Treatment values + 3 Timepoint values");
}

#[test]
fn test_emit_does_not_run_or_create_stage_directories() {
    let fixture = Fixture::new();
    let opts = sopline::commands::run::RunOptions {
        commands_only: true,
        ..fixture.options()
    };

    execute(opts).unwrap();

    for dir in ["taxa_summary", "alpha_diversity", "beta_diversity", "core_microbiome"] {
        assert!(
            !fixture.output.join(dir).exists(),
            "{dir} should not exist in emit mode"
        );
    }
    assert!(fixture.outputs_starting_with("secondary_batch_").is_empty());

    let script = fs::read_to_string(&fixture.outputs_starting_with("sopline_qiime18_")[0]).unwrap();
    assert!(script.contains("mkdir -p "));
}

#[test]
fn test_emit_with_legacy_toolkit_writes_second_script() {
    let fixture = Fixture::new();
    let activation = fixture.inputs.join("activate_qiime17.sh");
    fs::write(&activation, "true\n").unwrap();

    let opts = sopline::commands::run::RunOptions {
        commands_only: true,
        qiime17: Some(activation.clone()),
        ..fixture.options()
    };
    execute(opts).unwrap();

    let legacy = fixture.outputs_starting_with("sopline_qiime17_");
    assert_eq!(legacy.len(), 1);
    let script = fs::read_to_string(&legacy[0]).unwrap();
    assert!(script.contains(&format!(". {}", activation.display())));
    assert!(script.contains("# OTU Category Significance"));
    // Two categories, two tests each.
    let lines = script
        .lines()
        .filter(|l| l.starts_with("otu_category_significance.py"))
        .count();
    assert_eq!(lines, 4);
}

#[test]
fn test_emit_uses_absolute_input_paths() {
    let fixture = Fixture::new();
    let opts = sopline::commands::run::RunOptions {
        commands_only: true,
        ..fixture.options()
    };
    execute(opts).unwrap();

    let script = fs::read_to_string(&fixture.outputs_starting_with("sopline_qiime18_")[0]).unwrap();
    let biom = fixture.inputs.join("otu_table.biom");
    assert!(script.contains(&format!(
        "print_biom_table_summary.py -i {}",
        biom.display()
    )));
}
