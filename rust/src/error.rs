//! Error types for schedule analysis.

use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;

/// Why a task was rejected before any pass ran.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidTaskReason {
    EmptyId,
    EmptyName,
    NegativeDuration(f64),
    NonFiniteDuration,
    SelfDependency,
    DuplicateId,
}

impl fmt::Display for InvalidTaskReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "id is empty"),
            Self::EmptyName => write!(f, "name is empty"),
            Self::NegativeDuration(d) => write!(f, "duration {} is negative", d),
            Self::NonFiniteDuration => write!(f, "duration is not a finite number"),
            Self::SelfDependency => write!(f, "task lists itself as a predecessor"),
            Self::DuplicateId => write!(f, "id appears more than once"),
        }
    }
}

/// Which propagation pass gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Forward,
    Backward,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Forward => write!(f, "forward"),
            Pass::Backward => write!(f, "backward"),
        }
    }
}

/// Fatal conditions for an analysis call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid task {task_id:?}: {reason}")]
    InvalidTask {
        task_id: String,
        reason: InvalidTaskReason,
    },

    /// `cycle` lists the ids on one offending cycle, each depending on the
    /// next, with the first id repeated at the end.
    #[error("Circular dependency detected: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    #[error("{pass} pass did not converge after {iterations} iterations")]
    NonConvergence { pass: Pass, iterations: usize },

    #[error("Critical tasks exist but none of them starts a critical chain")]
    InconsistentCriticalGraph,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
