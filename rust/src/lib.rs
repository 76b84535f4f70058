//! Critical Path Method / PERT schedule analysis.
//!
//! Given tasks with durations and finish-to-start predecessors, computes
//! earliest and latest start/finish times, total and free slack, criticality,
//! the project horizon, and every critical path. Each call to [`analyze`] is
//! a pure function of its input: no state survives between calls.

// Allow clippy warning triggered by PyO3 macro expansion
#![cfg_attr(feature = "python", allow(clippy::useless_conversion))]

pub mod analysis;
pub mod backward_pass;
pub mod config;
pub mod critical_path;
pub mod error;
pub mod forward_pass;
pub mod graph;
pub mod interner;
pub mod logging;
pub mod models;
pub mod ordering;
pub mod relaxation;
pub mod slack;
pub mod views;

#[cfg(feature = "python")]
mod python;

pub use analysis::{analyze, analyze_with_config};
pub use config::{AnalysisConfig, ConfigError, PassStrategy, DEFAULT_CRITICAL_EPSILON};
pub use error::{AnalysisError, InvalidTaskReason, Pass};
pub use models::{Analysis, Priority, ScheduledTask, Task, TimeUnit, Warning};
pub use views::{gantt_bars, network_diagram, GanttBar, NetworkDiagram, NetworkLink, NetworkNode};
