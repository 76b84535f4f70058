//! Core data types for the analysis engine.

use chrono::NaiveDate;
#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Unit the caller expresses durations in.
///
/// Only a label: the engine works on bare numbers and never converts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hours,
    #[default]
    Days,
    Weeks,
    Months,
}

impl TimeUnit {
    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Hours => "hour(s)",
            TimeUnit::Days => "day(s)",
            TimeUnit::Weeks => "week(s)",
            TimeUnit::Months => "month(s)",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hours" => Ok(TimeUnit::Hours),
            "days" => Ok(TimeUnit::Days),
            "weeks" => Ok(TimeUnit::Weeks),
            "months" => Ok(TimeUnit::Months),
            other => Err(ConfigError::UnknownTimeUnit(other.to_string())),
        }
    }
}

/// Caller-assigned importance. Carried through untouched; scheduling ignores it.
#[cfg_attr(feature = "python", pyclass(eq, eq_int))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A unit of schedulable work as supplied by the caller.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub id: String,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub name: String,
    /// Duration in the project's time unit; 0 marks a milestone.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub duration: f64,
    /// Finish-to-start predecessors, by task id.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    #[serde(default, alias = "dependencies", alias = "predecessorIds")]
    pub predecessors: Vec<String>,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    #[serde(default)]
    pub priority: Priority,
    /// Free-form assignee list, e.g. "alice, bob".
    #[cfg_attr(feature = "python", pyo3(get, set))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<String>,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[cfg_attr(feature = "python", pyo3(get, set))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            predecessors: Vec::new(),
            description: None,
            priority: Priority::default(),
            resources: None,
            notes: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Replace the predecessor list.
    pub fn with_predecessors<I, S>(mut self, predecessors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessors = predecessors.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_milestone(&self) -> bool {
        self.duration == 0.0
    }
}

/// A task annotated with its computed schedule.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    #[cfg_attr(feature = "python", pyo3(get))]
    #[serde(flatten)]
    pub task: Task,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub earliest_start: f64,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub earliest_finish: f64,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub latest_start: f64,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub latest_finish: f64,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub total_slack: f64,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub free_slack: f64,
    #[cfg_attr(feature = "python", pyo3(get))]
    pub is_critical: bool,
}

impl ScheduledTask {
    pub fn id(&self) -> &str {
        &self.task.id
    }

    pub fn name(&self) -> &str {
        &self.task.name
    }

    pub fn duration(&self) -> f64 {
        self.task.duration
    }
}

/// Non-fatal findings reported alongside a successful analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Warning {
    /// A predecessor id that names no task in the input; treated as finished at time 0.
    DanglingReference { task_id: String, missing_id: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DanglingReference {
                task_id,
                missing_id,
            } => write!(
                f,
                "Task {:?} references unknown predecessor {:?}",
                task_id, missing_id
            ),
        }
    }
}

/// Result of analysing a task list.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Annotated tasks, in input order.
    #[cfg_attr(feature = "python", pyo3(get))]
    pub tasks: Vec<ScheduledTask>,
    /// Critical chains from source to sink, as task names.
    #[cfg_attr(feature = "python", pyo3(get))]
    pub critical_paths: Vec<Vec<String>>,
    /// The same chains as task ids.
    #[cfg_attr(feature = "python", pyo3(get))]
    pub critical_path_ids: Vec<Vec<String>>,
    /// Project horizon: the maximum earliest finish.
    #[cfg_attr(feature = "python", pyo3(get))]
    pub project_duration: f64,
    pub time_unit: TimeUnit,
    pub warnings: Vec<Warning>,
}

impl Analysis {
    /// Result for an empty task list.
    pub fn empty(time_unit: TimeUnit) -> Self {
        Self {
            time_unit,
            ..Self::default()
        }
    }

    pub fn task(&self, id: &str) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn critical_tasks(&self) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks.iter().filter(|t| t.is_critical)
    }

    /// The analysed tasks with all computed fields stripped.
    pub fn source_tasks(&self) -> Vec<Task> {
        self.tasks.iter().map(|t| t.task.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("b", "Build", 2.0).with_predecessors(["a"]);
        assert_eq!(task.predecessors, vec!["a".to_string()]);
        assert!(!task.is_milestone());
        assert!(Task::new("m", "Release", 0.0).is_milestone());
    }

    #[test]
    fn test_priority_defaults_to_medium() {
        assert_eq!(Task::new("a", "A", 1.0).priority, Priority::Medium);
    }

    #[test]
    fn test_time_unit_parse() {
        assert_eq!("weeks".parse::<TimeUnit>().unwrap(), TimeUnit::Weeks);
        assert_eq!(TimeUnit::default(), TimeUnit::Days);
        assert!("fortnights".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::DanglingReference {
            task_id: "b".to_string(),
            missing_id: "ghost".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Task \"b\" references unknown predecessor \"ghost\""
        );
    }
}
