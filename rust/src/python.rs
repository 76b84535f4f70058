//! PyO3 bindings, built with the `python` feature.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::analysis::analyze_with_config;
use crate::config::AnalysisConfig;
use crate::models::{Analysis, Priority, ScheduledTask, Task};

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (
        id,
        name,
        duration,
        predecessors=Vec::new(),
        description=None,
        priority=Priority::Medium,
        resources=None,
        notes=None,
        start_date=None,
        end_date=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn py_new(
        id: String,
        name: String,
        duration: f64,
        predecessors: Vec<String>,
        description: Option<String>,
        priority: Priority,
        resources: Option<String>,
        notes: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            name,
            duration,
            predecessors,
            description,
            priority,
            resources,
            notes,
            start_date,
            end_date,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, name={:?}, duration={}, predecessors={:?})",
            self.id, self.name, self.duration, self.predecessors
        )
    }
}

#[pymethods]
impl ScheduledTask {
    #[getter(id)]
    fn py_id(&self) -> String {
        self.task.id.clone()
    }

    #[getter(name)]
    fn py_name(&self) -> String {
        self.task.name.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduledTask(id={:?}, es={}, ef={}, ls={}, lf={}, total_slack={}, critical={})",
            self.task.id,
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.total_slack,
            self.is_critical
        )
    }
}

#[pymethods]
impl Analysis {
    #[getter(time_unit)]
    fn py_time_unit(&self) -> &'static str {
        self.time_unit.label()
    }

    #[getter(warnings)]
    fn py_warnings(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "Analysis(tasks={}, project_duration={}, critical_paths={})",
            self.tasks.len(),
            self.project_duration,
            self.critical_paths.len()
        )
    }
}

/// Compute the CPM schedule of a task list.
///
/// # Raises
/// * ValueError on unknown options, invalid tasks, cycles, or non-convergence
#[pyfunction]
#[pyo3(name = "analyze")]
#[pyo3(signature = (tasks, strategy=None, critical_epsilon=None, verbosity=None, time_unit=None))]
fn py_analyze(
    tasks: Vec<Task>,
    strategy: Option<&str>,
    critical_epsilon: Option<f64>,
    verbosity: Option<u8>,
    time_unit: Option<&str>,
) -> PyResult<Analysis> {
    let config = AnalysisConfig::from_options(strategy, critical_epsilon, verbosity, time_unit)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
    analyze_with_config(&tasks, &config)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
}

/// The cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Priority>()?;
    m.add_class::<Task>()?;
    m.add_class::<ScheduledTask>()?;
    m.add_class::<Analysis>()?;
    m.add_function(wrap_pyfunction!(py_analyze, m)?)?;
    Ok(())
}
