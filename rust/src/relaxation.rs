//! Bounded work-list relaxation shared by the forward and backward passes.
//!
//! Every task starts on the work list. A popped task is evaluated from its
//! inputs; once its value changes, the tasks that read it are queued again.
//! Nothing is rescanned unless one of its inputs moved. On a DAG each edge
//! re-queues its reader at most once, so `n + edges <= n²` pops always
//! suffice; the ceiling is enforced anyway and a drained list that still
//! holds undefined values is reported as non-convergence.

use std::collections::VecDeque;

use crate::error::{AnalysisError, Pass};
use crate::interner::TaskIdInt;
use crate::log_debug;

/// Hard limit on work-list pops for a graph of `n` tasks.
pub fn iteration_ceiling(n: usize) -> usize {
    n.saturating_mul(n).max(1)
}

/// Run the work list to a fixed point.
///
/// `evaluate(task, values)` returns `None` while some input of `task` is
/// still undefined. `readers[task]` lists the tasks to revisit when the
/// value of `task` changes.
pub(crate) fn relax<T, F>(
    readers: &[Vec<TaskIdInt>],
    seeds: impl IntoIterator<Item = TaskIdInt>,
    pass: Pass,
    verbosity: u8,
    mut evaluate: F,
) -> Result<Vec<T>, AnalysisError>
where
    T: Copy + PartialEq,
    F: FnMut(TaskIdInt, &[Option<T>]) -> Option<T>,
{
    let n = readers.len();
    let ceiling = iteration_ceiling(n);
    let mut values: Vec<Option<T>> = vec![None; n];
    let mut queued = vec![false; n];
    let mut queue: VecDeque<TaskIdInt> = VecDeque::with_capacity(n);

    for task in seeds {
        if !queued[task as usize] {
            queued[task as usize] = true;
            queue.push_back(task);
        }
    }

    let mut iterations = 0usize;
    while let Some(task) = queue.pop_front() {
        iterations += 1;
        if iterations > ceiling {
            return Err(AnalysisError::NonConvergence {
                pass,
                iterations: ceiling,
            });
        }
        queued[task as usize] = false;

        let Some(value) = evaluate(task, &values) else {
            log_debug!(verbosity, "{} relaxation: task {} not ready", pass, task);
            continue;
        };
        if values[task as usize] == Some(value) {
            continue;
        }
        values[task as usize] = Some(value);

        for &reader in &readers[task as usize] {
            if !queued[reader as usize] {
                queued[reader as usize] = true;
                queue.push_back(reader);
            }
        }
    }

    log_debug!(
        verbosity,
        "{} relaxation settled after {} iterations",
        pass,
        iterations
    );

    values
        .into_iter()
        .collect::<Option<Vec<T>>>()
        .ok_or(AnalysisError::NonConvergence { pass, iterations })
}
