//! Direct execution of a planned batch.
//!
//! Commands run one at a time through the system shell, each waited on before
//! the next starts. There is no parallelism, timeout or cancellation: toolkit
//! stages read the outputs of earlier stages from disk.
//!
//! # Exit statuses
//!
//! `ExitPolicy::Ignore` waits on each command without inspecting its status.
//! `ExitPolicy::Collect` (the default) runs everything and records each
//! non-zero exit in a per-stage failure list. `ExitPolicy::FailFast` stops at
//! the first one.

mod config;
mod launcher;
mod result;
mod sequence;


pub use config::{ExitPolicy, RunnerConfig};
pub use launcher::{with_activation, CommandLauncher, LaunchOutcome, ShellLauncher};
pub use result::{CommandOutcome, RunReport, StageReport};
pub use sequence::run_batch;
