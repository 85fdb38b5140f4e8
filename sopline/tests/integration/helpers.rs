//! Shared test helpers for sopline integration tests

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use sopline::commands::run::RunOptions;
use sopline::params::PARAMS_EXAMPLE;

/// Mapping file with two categories: Treatment {Control, Drug} and
/// Timepoint {Day0, Day7, Day14}.
pub const MAPPING: &str = "#SampleID\tBarcodeSequence\tLinkerPrimerSequence\tTreatment\tTimepoint\tDescription\n\
S1\tAAAA\tGTGC\tControl\tDay0\tmouse one\n\
S2\tCCCC\tGTGC\tDrug\tDay7\tmouse two\n\
S3\tGGGG\tGTGC\tControl\tDay14\tmouse three\n\
S4\tTTTT\tGTGC\tDrug\tDay0\tmouse four\n";

/// Toolkit programs the SOP invokes, including the availability checker.
pub const TOOLKIT_PROGRAMS: [&str; 11] = [
    "print_qiime_config.py",
    "print_biom_table_summary.py",
    "summarize_taxa_through_plots.py",
    "alpha_rarefaction.py",
    "compare_alpha_diversity.py",
    "beta_diversity_through_plots.py",
    "make_2d_plots.py",
    "compare_categories.py",
    "compute_core_microbiome.py",
    "group_significance.py",
    "otu_category_significance.py",
];

/// A temporary analysis directory with input files and an output root.
pub struct Fixture {
    pub temp: TempDir,
    pub inputs: PathBuf,
    pub output: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_files(MAPPING, &format!("{PARAMS_EXAMPLE}\n"))
    }

    pub fn with_files(mapping: &str, params: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let inputs = temp.path().join("inputs");
        let output = temp.path().join("out");
        fs::create_dir_all(&inputs).expect("Failed to create inputs directory");

        fs::write(inputs.join("otu_table.biom"), "{}").expect("Failed to write biom");
        fs::write(inputs.join("map.txt"), mapping).expect("Failed to write mapping");
        fs::write(inputs.join("params.txt"), params).expect("Failed to write params");
        fs::write(inputs.join("rep_set.tre"), "();").expect("Failed to write tree");

        Self {
            temp,
            inputs,
            output,
        }
    }

    pub fn options(&self) -> RunOptions {
        RunOptions {
            biom: self.inputs.join("otu_table.biom"),
            mapping: self.inputs.join("map.txt"),
            params: self.inputs.join("params.txt"),
            tree: self.inputs.join("rep_set.tre"),
            output_dir: self.output.clone(),
            ..Default::default()
        }
    }

    /// Generated files in the output root whose names start with `prefix`.
    pub fn outputs_starting_with(&self, prefix: &str) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = fs::read_dir(&self.output)
            .expect("Failed to read output directory")
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(prefix))
            })
            .collect();
        found.sort();
        found
    }
}

/// Install fake toolkit programs into `bin_dir`.
///
/// Each program appends its name and arguments to `trace` and exits 0,
/// except the programs listed in `failing`, which exit 1.
pub fn install_fake_toolkit(bin_dir: &Path, trace: &Path, failing: &[&str]) {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(bin_dir).expect("Failed to create bin directory");
    for program in TOOLKIT_PROGRAMS {
        let status = if failing.contains(&program) { 1 } else { 0 };
        let script = format!(
            "#!/bin/sh\necho \"{program} $*\" >> '{}'\nexit {status}\n",
            trace.display()
        );
        let path = bin_dir.join(program);
        fs::write(&path, script).expect("Failed to write fake program");
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to make fake program executable");
    }
}

/// Restores `PATH` when dropped.
pub struct PathGuard {
    original: Option<OsString>,
}

impl PathGuard {
    /// Put `dir` in front of `PATH`.
    pub fn prepend(dir: &Path) -> Self {
        let original = std::env::var_os("PATH");
        let mut paths = vec![dir.to_path_buf()];
        if let Some(existing) = &original {
            paths.extend(std::env::split_paths(existing));
        }
        let joined = std::env::join_paths(paths).expect("Failed to join PATH");
        std::env::set_var("PATH", joined);
        Self { original }
    }
}

impl Drop for PathGuard {
    fn drop(&mut self) {
        match &self.original {
            Some(value) => std::env::set_var("PATH", value),
            None => std::env::remove_var("PATH"),
        }
    }
}

/// Program names recorded in a trace file, in invocation order.
pub fn traced_programs(trace: &Path) -> Vec<String> {
    fs::read_to_string(trace)
        .unwrap_or_default()
        .lines()
        .filter_map(|line| line.split_whitespace().next().map(str::to_string))
        .collect()
}

/// Run the `sopline` binary with the fixture's inputs plus `extra` arguments.
///
/// Colors are disabled and `RUST_LOG` is cleared so stderr carries the
/// default diagnostics only.
pub fn run_binary(fixture: &Fixture, extra: &[&str]) -> std::process::Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_sopline"))
        .arg("-b")
        .arg(fixture.inputs.join("otu_table.biom"))
        .arg("-m")
        .arg(fixture.inputs.join("map.txt"))
        .arg("-p")
        .arg(fixture.inputs.join("params.txt"))
        .arg("-t")
        .arg(fixture.inputs.join("rep_set.tre"))
        .arg("-o")
        .arg(&fixture.output)
        .args(extra)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run sopline binary")
}
