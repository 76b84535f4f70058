//! Backward pass: latest start and finish for every task.
//!
//! A sink (no dependents) must finish at its own earliest finish, so sinks
//! on shorter dead-end branches do not pick up slack from the global horizon.
//! Every other task must finish by the earliest latest-start of its
//! dependents: `LF(t) = min(LS(s))`, `LS(t) = LF(t) - duration(t)`.

use crate::error::{AnalysisError, Pass};
use crate::forward_pass::ForwardTimes;
use crate::graph::TaskGraph;
use crate::interner::TaskIdInt;
use crate::log_checks;
use crate::relaxation::relax;

/// Latest times indexed by task ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackwardTimes {
    pub latest_start: Vec<f64>,
    pub latest_finish: Vec<f64>,
}

/// Latest finish given the latest starts computed so far.
///
/// Returns `None` if a dependent has no latest start yet.
fn finish_from_dependents(
    graph: &TaskGraph,
    forward: &ForwardTimes,
    task: TaskIdInt,
    start: impl Fn(TaskIdInt) -> Option<f64>,
) -> Option<f64> {
    let dependents = &graph.succs[task as usize];
    if dependents.is_empty() {
        return Some(forward.earliest_finish[task as usize]);
    }
    let mut finish = f64::INFINITY;
    for &dependent in dependents {
        finish = finish.min(start(dependent)?);
    }
    Some(finish)
}

/// Single sweep over a topological `order`, walked in reverse.
pub fn backward_pass(
    graph: &TaskGraph,
    order: &[TaskIdInt],
    forward: &ForwardTimes,
    verbosity: u8,
) -> BackwardTimes {
    let n = graph.len();
    let mut latest_start: Vec<Option<f64>> = vec![None; n];
    let mut latest_finish = vec![0.0; n];

    for &task in order.iter().rev() {
        let idx = task as usize;
        // Dependents follow `task` in `order`, so they are already done
        let finish = finish_from_dependents(graph, forward, task, |s| latest_start[s as usize])
            .unwrap_or(forward.earliest_finish[idx]);
        let start = finish - graph.durations[idx];
        latest_finish[idx] = finish;
        latest_start[idx] = Some(start);

        log_checks!(
            verbosity,
            "backward: {} ls={} lf={}",
            graph.id_of(task),
            start,
            finish
        );
    }

    BackwardTimes {
        latest_start: latest_start
            .into_iter()
            .map(|s| s.unwrap_or(0.0))
            .collect(),
        latest_finish,
    }
}

/// Work-list variant that needs no precomputed order.
///
/// # Returns
/// * `Err(AnalysisError::NonConvergence)` if some latest start stays
///   undefined (a cycle) or the iteration ceiling is exceeded
pub fn backward_relaxation(
    graph: &TaskGraph,
    forward: &ForwardTimes,
    verbosity: u8,
) -> Result<BackwardTimes, AnalysisError> {
    let n = graph.len();
    let times = relax(
        &graph.preds,
        (0..n as TaskIdInt).rev(),
        Pass::Backward,
        verbosity,
        |task, values: &[Option<(f64, f64)>]| {
            let finish = finish_from_dependents(graph, forward, task, |s| {
                values[s as usize].map(|(ls, _)| ls)
            })?;
            Some((finish - graph.durations[task as usize], finish))
        },
    )?;

    for (idx, &(start, finish)) in times.iter().enumerate() {
        log_checks!(
            verbosity,
            "backward: {} ls={} lf={}",
            graph.id_of(idx as TaskIdInt),
            start,
            finish
        );
    }

    let (latest_start, latest_finish) = times.into_iter().unzip();
    Ok(BackwardTimes {
        latest_start,
        latest_finish,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward_pass::{forward_pass, forward_relaxation};
    use crate::models::Task;
    use crate::ordering::topological_order;

    fn make_task(id: &str, duration: f64, deps: Vec<&str>) -> Task {
        Task::new(id, id, duration).with_predecessors(deps)
    }

    fn run(tasks: &[Task]) -> (ForwardTimes, BackwardTimes) {
        let graph = TaskGraph::build(tasks).unwrap();
        let order = topological_order(&graph, 0).unwrap();
        let forward = forward_pass(&graph, &order, 0);
        let backward = backward_pass(&graph, &order, &forward, 0);
        (forward, backward)
    }

    #[test]
    fn test_single_task() {
        let (_, backward) = run(&[make_task("a", 5.0, vec![])]);
        assert_eq!(backward.latest_start, vec![0.0]);
        assert_eq!(backward.latest_finish, vec![5.0]);
    }

    #[test]
    fn test_chain() {
        let (_, backward) = run(&[
            make_task("a", 3.0, vec![]),
            make_task("b", 2.0, vec!["a"]),
            make_task("c", 4.0, vec!["b"]),
        ]);
        assert_eq!(backward.latest_start, vec![0.0, 3.0, 5.0]);
        assert_eq!(backward.latest_finish, vec![3.0, 5.0, 9.0]);
    }

    #[test]
    fn test_diamond() {
        // d depends on b and c, which both depend on a
        let (_, backward) = run(&[
            make_task("a", 2.0, vec![]),
            make_task("b", 3.0, vec!["a"]),
            make_task("c", 5.0, vec!["a"]),
            make_task("d", 1.0, vec!["b", "c"]),
        ]);
        // b may slip until c's path catches up: LS(b) = LS(d) - 3 = 4
        assert_eq!(backward.latest_start, vec![0.0, 4.0, 2.0, 7.0]);
        assert_eq!(backward.latest_finish, vec![2.0, 7.0, 7.0, 8.0]);
    }

    #[test]
    fn test_short_sink_finishes_at_own_earliest_finish() {
        // a -> long (10), a -> short (1); both are sinks
        let (forward, backward) = run(&[
            make_task("a", 1.0, vec![]),
            make_task("long", 10.0, vec!["a"]),
            make_task("short", 1.0, vec!["a"]),
        ]);
        assert_eq!(forward.horizon(), 11.0);
        assert_eq!(backward.latest_finish[2], forward.earliest_finish[2]);
        assert_eq!(backward.latest_finish[2], 2.0);
    }

    #[test]
    fn test_relaxation_matches_ordered_pass() {
        let tasks = vec![
            make_task("d", 1.0, vec!["b", "c"]),
            make_task("c", 5.0, vec!["a"]),
            make_task("b", 3.0, vec!["a"]),
            make_task("a", 2.0, vec![]),
            make_task("lone", 4.0, vec![]),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let order = topological_order(&graph, 0).unwrap();
        let forward = forward_pass(&graph, &order, 0);

        let ordered = backward_pass(&graph, &order, &forward, 0);
        let relaxed_forward = forward_relaxation(&graph, 0).unwrap();
        let relaxed = backward_relaxation(&graph, &relaxed_forward, 0).unwrap();
        assert_eq!(ordered, relaxed);
    }

    #[test]
    fn test_relaxation_on_cycle_does_not_converge() {
        let tasks = vec![
            make_task("a", 1.0, vec!["b"]),
            make_task("b", 1.0, vec!["a"]),
            make_task("end", 1.0, vec!["a"]),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let forward = ForwardTimes {
            earliest_start: vec![0.0; 3],
            earliest_finish: vec![1.0; 3],
        };

        match backward_relaxation(&graph, &forward, 0) {
            Err(AnalysisError::NonConvergence { pass, .. }) => assert_eq!(pass, Pass::Backward),
            other => panic!("expected non-convergence, got {:?}", other),
        }
    }
}
