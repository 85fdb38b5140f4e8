//! Command planning for the secondary analysis SOP.
//!
//! The plan is a pure expansion: fixed catalogs of metrics and tests are
//! crossed with the selected categories (and, for the core microbiome, with
//! each category's observed values) to produce an ordered `CommandBatch`.
//! Nothing here touches the filesystem or spawns processes.
//!
//! Stage order and the iteration order inside each stage are part of the
//! output contract: emitted scripts must be byte-for-byte reproducible for the
//! same inputs.

mod batch;
pub mod catalog;
mod command;
mod planner;
mod stage;


pub use batch::{CommandBatch, StageBatch};
pub use command::PlannedCommand;
pub use planner::{AnalysisSettings, CommandPlanner, PlanInputs};
pub use stage::Stage;
