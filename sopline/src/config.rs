//! Optional `sopline.toml` defaults.
//!
//! Values here sit below command-line flags: a flag always wins, the file
//! fills in what the flags leave out, and built-in defaults cover the rest.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SoplineError};
use crate::plan::AnalysisSettings;
use crate::runner::ExitPolicy;

/// File looked up in the workspace root when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "sopline.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolkitConfig {
    /// QIIME 1.7 activation script.
    pub qiime17: Option<PathBuf>,
    /// QIIME 1.8 activation script.
    pub qiime18: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunSection {
    pub exit_policy: Option<ExitPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub toolkit: ToolkitConfig,
    pub run: RunSection,
    pub analysis: AnalysisSettings,
}

impl Config {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| SoplineError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content, path)
    }

    /// Load an explicit config file, or the workspace default if it exists.
    pub fn discover(explicit: Option<&Path>, workspace_root: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = workspace_root.join(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
