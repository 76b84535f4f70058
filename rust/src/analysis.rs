//! Single entry point composing the analysis pipeline.
//!
//! task list → graph → topological order → forward pass → backward pass
//! → slack/criticality → critical chains → `Analysis`.
//!
//! Each call works on its own copies; the caller's tasks are only read.

use crate::backward_pass::{backward_pass, backward_relaxation};
use crate::config::{AnalysisConfig, PassStrategy};
use crate::critical_path::enumerate_critical_paths;
use crate::error::AnalysisError;
use crate::forward_pass::{forward_pass, forward_relaxation};
use crate::graph::TaskGraph;
use crate::log_changes;
use crate::models::{Analysis, ScheduledTask, Task};
use crate::ordering::topological_order;
use crate::slack::derive_timings;

/// Analyse `tasks` with the default configuration.
pub fn analyze(tasks: &[Task]) -> Result<Analysis, AnalysisError> {
    analyze_with_config(tasks, &AnalysisConfig::default())
}

/// Compute the CPM schedule of `tasks`.
///
/// # Returns
/// * `Ok(Analysis)` with every task annotated, in input order
/// * `Err(AnalysisError::Config)` if `config` fails validation
/// * `Err(AnalysisError::InvalidTask)` before any pass runs
/// * `Err(AnalysisError::CyclicDependency)` if predecessors form a cycle;
///   the check runs whatever `config.strategy` says
/// * `Err(AnalysisError::NonConvergence)` if a relaxation pass gives up
pub fn analyze_with_config(
    tasks: &[Task],
    config: &AnalysisConfig,
) -> Result<Analysis, AnalysisError> {
    config.validate()?;
    let verbosity = config.verbosity;
    if tasks.is_empty() {
        return Ok(Analysis::empty(config.time_unit));
    }

    let graph = TaskGraph::build(tasks)?;
    let order = topological_order(&graph, verbosity)?;
    log_changes!(
        verbosity,
        "analysing {} tasks, {} dependencies, {} strategy",
        graph.len(),
        graph.edge_count(),
        config.strategy
    );

    let (forward, backward) = match config.strategy {
        PassStrategy::Topological => {
            let forward = forward_pass(&graph, &order, verbosity);
            let backward = backward_pass(&graph, &order, &forward, verbosity);
            (forward, backward)
        }
        PassStrategy::Relaxation => {
            let forward = forward_relaxation(&graph, verbosity)?;
            let backward = backward_relaxation(&graph, &forward, verbosity)?;
            (forward, backward)
        }
    };

    let project_duration = forward.horizon();
    log_changes!(verbosity, "project horizon: {}", project_duration);

    let timings = derive_timings(
        &graph,
        &forward,
        &backward,
        config.critical_epsilon,
        verbosity,
    );
    let critical: Vec<bool> = timings.iter().map(|t| t.is_critical).collect();
    let chains = enumerate_critical_paths(&graph, &critical, verbosity)?;

    let critical_paths: Vec<Vec<String>> = chains
        .iter()
        .map(|chain| {
            chain
                .iter()
                .map(|&t| tasks[t as usize].name.clone())
                .collect()
        })
        .collect();
    let critical_path_ids: Vec<Vec<String>> = chains
        .iter()
        .map(|chain| chain.iter().map(|&t| graph.id_of(t).to_string()).collect())
        .collect();

    let scheduled: Vec<ScheduledTask> = tasks
        .iter()
        .zip(timings)
        .map(|(task, timing)| ScheduledTask {
            task: task.clone(),
            earliest_start: timing.earliest_start,
            earliest_finish: timing.earliest_finish,
            latest_start: timing.latest_start,
            latest_finish: timing.latest_finish,
            total_slack: timing.total_slack,
            free_slack: timing.free_slack,
            is_critical: timing.is_critical,
        })
        .collect();

    Ok(Analysis {
        tasks: scheduled,
        critical_paths,
        critical_path_ids,
        project_duration,
        time_unit: config.time_unit,
        warnings: graph.dangling,
    })
}
