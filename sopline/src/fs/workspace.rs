use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const TAXA_SUMMARY_DIR: &str = "taxa_summary";
pub const ALPHA_DIVERSITY_DIR: &str = "alpha_diversity";
pub const ALPHA_COLLATED_DIR: &str = "alpha_diversity/alpha_div_collated";
pub const BETA_DIVERSITY_DIR: &str = "beta_diversity";
pub const CORE_MICROBIOME_DIR: &str = "core_microbiome";

/// Directory every output path of a run is built under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot {
    root: PathBuf,
}

impl WorkspaceRoot {
    /// Anchor a workspace at `base_path`, made absolute against the current
    /// directory once here so no later step depends on it.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let base = base_path.as_ref();
        let root = if base.is_absolute() {
            base.to_path_buf()
        } else {
            std::env::current_dir()
                .context("Failed to determine current directory")?
                .join(base)
        };
        Ok(Self { root })
    }

    /// Create the root directory if needed and check it is a directory.
    pub fn initialize(&self) -> Result<()> {
        if self.root.exists() && !self.root.is_dir() {
            bail!("{} exists and is not a directory", self.root.display());
        }
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create {}", self.root.display()))?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn join<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.root.join(relative)
    }

    pub fn taxa_summary_dir(&self) -> PathBuf {
        self.join(TAXA_SUMMARY_DIR)
    }

    pub fn alpha_diversity_dir(&self) -> PathBuf {
        self.join(ALPHA_DIVERSITY_DIR)
    }

    pub fn alpha_collated_dir(&self) -> PathBuf {
        self.join(ALPHA_COLLATED_DIR)
    }

    pub fn beta_diversity_dir(&self) -> PathBuf {
        self.join(BETA_DIVERSITY_DIR)
    }

    pub fn core_microbiome_dir(&self) -> PathBuf {
        self.join(CORE_MICROBIOME_DIR)
    }
}
