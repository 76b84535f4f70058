//! Topological ordering of the task graph.
//!
//! Depth-first search over predecessor edges with a three-colour marking.
//! A task is appended only after all of its predecessors, so the result
//! lists every dependency before its dependents. Roots are tried in input
//! order and predecessors in listed order, which keeps the output stable
//! for a given input.

use crate::error::AnalysisError;
use crate::graph::TaskGraph;
use crate::interner::TaskIdInt;
use crate::log_debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Order every task after all of its predecessors.
///
/// Uses an explicit stack instead of recursion so long chains cannot
/// overflow the call stack.
///
/// # Returns
/// * `Ok(order)` containing each task index exactly once
/// * `Err(AnalysisError::CyclicDependency)` naming the ids on the first cycle found
pub fn topological_order(
    graph: &TaskGraph,
    verbosity: u8,
) -> Result<Vec<TaskIdInt>, AnalysisError> {
    let n = graph.len();
    let mut marks = vec![Mark::Unvisited; n];
    let mut order: Vec<TaskIdInt> = Vec::with_capacity(n);
    // (task, index of the next predecessor to visit)
    let mut stack: Vec<(TaskIdInt, usize)> = Vec::new();

    for root in 0..n as TaskIdInt {
        if marks[root as usize] != Mark::Unvisited {
            continue;
        }
        marks[root as usize] = Mark::InProgress;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (task, cursor) = *frame;
            let preds = &graph.preds[task as usize];

            if cursor < preds.len() {
                frame.1 += 1;
                let pred = preds[cursor];
                match marks[pred as usize] {
                    Mark::Unvisited => {
                        log_debug!(
                            verbosity,
                            "ordering: {} -> visit {}",
                            graph.id_of(task),
                            graph.id_of(pred)
                        );
                        marks[pred as usize] = Mark::InProgress;
                        stack.push((pred, 0));
                    }
                    Mark::InProgress => return Err(cycle_error(graph, &stack, pred)),
                    Mark::Done => {}
                }
            } else {
                marks[task as usize] = Mark::Done;
                order.push(task);
                stack.pop();
            }
        }
    }

    Ok(order)
}

/// The in-progress tasks from `pred` to the top of the stack form the cycle.
fn cycle_error(graph: &TaskGraph, stack: &[(TaskIdInt, usize)], pred: TaskIdInt) -> AnalysisError {
    let start = stack
        .iter()
        .position(|&(task, _)| task == pred)
        .unwrap_or(0);
    let mut cycle: Vec<String> = stack[start..]
        .iter()
        .map(|&(task, _)| graph.id_of(task).to_string())
        .collect();
    cycle.push(graph.id_of(pred).to_string());
    AnalysisError::CyclicDependency { cycle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    fn make_task(id: &str, deps: Vec<&str>) -> Task {
        Task::new(id, id, 1.0).with_predecessors(deps)
    }

    fn ids(graph: &TaskGraph, order: &[TaskIdInt]) -> Vec<String> {
        order.iter().map(|&t| graph.id_of(t).to_string()).collect()
    }

    fn assert_topological(graph: &TaskGraph, order: &[TaskIdInt]) {
        assert_eq!(order.len(), graph.len());
        let mut position = vec![usize::MAX; graph.len()];
        for (pos, &task) in order.iter().enumerate() {
            position[task as usize] = pos;
        }
        for (task, preds) in graph.preds.iter().enumerate() {
            for &pred in preds {
                assert!(position[pred as usize] < position[task]);
            }
        }
    }

    #[test]
    fn test_dependencies_come_first() {
        // Listed dependents-first on purpose
        let tasks = vec![
            make_task("d", vec!["b", "c"]),
            make_task("c", vec!["a"]),
            make_task("b", vec!["a"]),
            make_task("a", vec![]),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let order = topological_order(&graph, 0).unwrap();

        assert_topological(&graph, &order);
        assert_eq!(ids(&graph, &order), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_isolated_tasks_keep_input_order() {
        let tasks = vec![
            make_task("x", vec![]),
            make_task("b", vec!["a"]),
            make_task("a", vec![]),
            make_task("y", vec![]),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        let order = topological_order(&graph, 0).unwrap();
        assert_eq!(ids(&graph, &order), vec!["x", "a", "b", "y"]);
    }

    #[test]
    fn test_dangling_reference_ignored() {
        let tasks = vec![make_task("a", vec!["ghost"]), make_task("b", vec!["a"])];
        let graph = TaskGraph::build(&tasks).unwrap();
        let order = topological_order(&graph, 0).unwrap();
        assert_eq!(ids(&graph, &order), vec!["a", "b"]);
    }

    #[test]
    fn test_two_cycle_detected() {
        let tasks = vec![make_task("a", vec!["b"]), make_task("b", vec!["a"])];
        let graph = TaskGraph::build(&tasks).unwrap();

        let err = topological_order(&graph, 0).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::CyclicDependency {
                cycle: vec!["a".to_string(), "b".to_string(), "a".to_string()],
            }
        );
    }

    #[test]
    fn test_cycle_behind_acyclic_prefix() {
        // start -> x -> y -> z -> x
        let tasks = vec![
            make_task("start", vec!["x"]),
            make_task("x", vec!["z"]),
            make_task("y", vec!["x"]),
            make_task("z", vec!["y"]),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();

        match topological_order(&graph, 0) {
            Err(AnalysisError::CyclicDependency { cycle }) => {
                assert_eq!(cycle, vec!["x", "z", "y", "x"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let n = 50_000;
        let mut tasks = vec![make_task("t0", vec![])];
        for i in 1..n {
            let prev = format!("t{}", i - 1);
            tasks.push(Task::new(format!("t{}", i), "step", 1.0).with_predecessors([prev]));
        }
        tasks.reverse();
        let graph = TaskGraph::build(&tasks).unwrap();
        let order = topological_order(&graph, 0).unwrap();
        assert_topological(&graph, &order);
    }
}
