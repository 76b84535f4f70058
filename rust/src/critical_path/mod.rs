//! Critical path extraction.
//!
//! A critical path is a maximal chain of critical tasks, from a critical
//! task with no critical predecessor to one with no critical successor,
//! where each task is a direct predecessor of the next. Branching in the
//! critical subgraph produces several coexisting paths.

mod enumeration;

pub use enumeration::{critical_sources, enumerate_critical_paths, PATH_COUNT_WARN_THRESHOLD};
