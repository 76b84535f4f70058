//! Enumeration of critical chains through the task graph.

use crate::error::AnalysisError;
use crate::graph::TaskGraph;
use crate::interner::TaskIdInt;
use crate::{log_changes, log_debug};

/// Path counts above this are reported with `log::warn!`.
///
/// Each critical diamond in series doubles the number of chains, so large
/// counts mean the caller is receiving an exponential result.
pub const PATH_COUNT_WARN_THRESHOLD: usize = 1024;

/// Critical tasks with no critical predecessor, in input order.
pub fn critical_sources(graph: &TaskGraph, critical: &[bool]) -> Vec<TaskIdInt> {
    (0..graph.len())
        .filter(|&idx| {
            critical[idx] && !graph.preds[idx].iter().any(|&p| critical[p as usize])
        })
        .map(|idx| idx as TaskIdInt)
        .collect()
}

fn critical_successors<'a>(
    graph: &'a TaskGraph,
    critical: &'a [bool],
    task: TaskIdInt,
) -> impl Iterator<Item = TaskIdInt> + 'a {
    graph.succs[task as usize]
        .iter()
        .copied()
        .filter(move |&s| critical[s as usize])
}

/// Every chain of critical tasks from a critical source to a task with no
/// critical successor.
///
/// Sources are taken in input order and each branch follows successors in
/// input order, so the result is deterministic. Branching subgraphs yield
/// one chain per branch; diamonds yield chains that share a prefix and
/// suffix.
///
/// Walks with an explicit stack. Each non-sink critical task has at least
/// one critical successor, so every branch explored ends in a reported chain.
///
/// # Returns
/// * `Ok(vec![])` when nothing is critical
/// * `Err(AnalysisError::InconsistentCriticalGraph)` when critical tasks
///   exist but no chain can start or a chain loops back on itself
pub fn enumerate_critical_paths(
    graph: &TaskGraph,
    critical: &[bool],
    verbosity: u8,
) -> Result<Vec<Vec<TaskIdInt>>, AnalysisError> {
    if !critical.iter().any(|&c| c) {
        return Ok(Vec::new());
    }

    let sources = critical_sources(graph, critical);
    if sources.is_empty() {
        return Err(AnalysisError::InconsistentCriticalGraph);
    }

    let mut paths: Vec<Vec<TaskIdInt>> = Vec::new();
    let mut on_path = vec![false; graph.len()];

    for &source in &sources {
        // (task, index into succs of the next successor to try)
        let mut stack: Vec<(TaskIdInt, usize)> = vec![(source, 0)];
        on_path[source as usize] = true;

        if critical_successors(graph, critical, source).next().is_none() {
            paths.push(vec![source]);
        }

        while let Some(frame) = stack.last_mut() {
            let (task, cursor) = *frame;
            let succs = &graph.succs[task as usize];
            let next = (cursor..succs.len()).find(|&i| critical[succs[i] as usize]);

            match next {
                Some(i) => {
                    frame.1 = i + 1;
                    let succ = succs[i];
                    if on_path[succ as usize] {
                        return Err(AnalysisError::InconsistentCriticalGraph);
                    }
                    log_debug!(
                        verbosity,
                        "critical path: {} -> {}",
                        graph.id_of(task),
                        graph.id_of(succ)
                    );
                    on_path[succ as usize] = true;
                    stack.push((succ, 0));

                    if critical_successors(graph, critical, succ).next().is_none() {
                        paths.push(stack.iter().map(|&(t, _)| t).collect());
                    }
                }
                None => {
                    on_path[task as usize] = false;
                    stack.pop();
                }
            }
        }
    }

    log_changes!(
        verbosity,
        "found {} critical path(s) from {} source(s)",
        paths.len(),
        sources.len()
    );
    if paths.len() > PATH_COUNT_WARN_THRESHOLD {
        log::warn!(
            "{} critical paths enumerated over {} tasks; branching critical subgraph",
            paths.len(),
            graph.len()
        );
    }

    Ok(paths)
}
