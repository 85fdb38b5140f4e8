//! Configuration for sequential batch execution

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// What to do with a command's exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitPolicy {
    /// Never inspect exit statuses; every command runs regardless.
    Ignore,
    /// Record failures per stage and keep going (default).
    #[default]
    Collect,
    /// Stop the batch at the first failing command.
    FailFast,
}

impl fmt::Display for ExitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitPolicy::Ignore => write!(f, "ignore"),
            ExitPolicy::Collect => write!(f, "collect"),
            ExitPolicy::FailFast => write!(f, "fail-fast"),
        }
    }
}

impl FromStr for ExitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(ExitPolicy::Ignore),
            "collect" => Ok(ExitPolicy::Collect),
            "fail-fast" | "failfast" => Ok(ExitPolicy::FailFast),
            _ => Err(format!(
                "Unknown exit policy: {s}. Expected 'ignore', 'collect' or 'fail-fast'"
            )),
        }
    }
}

/// Settings for one batch execution.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub exit_policy: ExitPolicy,
    /// Activation script sourced before every command.
    pub activation: Option<PathBuf>,
    /// Directory commands are started in.
    pub working_dir: PathBuf,
}

impl RunnerConfig {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            exit_policy: ExitPolicy::default(),
            activation: None,
            working_dir,
        }
    }

    pub fn with_exit_policy(mut self, exit_policy: ExitPolicy) -> Self {
        self.exit_policy = exit_policy;
        self
    }

    pub fn with_activation(mut self, activation: Option<PathBuf>) -> Self {
        self.activation = activation;
        self
    }
}
