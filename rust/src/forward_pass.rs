//! Forward pass: earliest start and finish for every task.
//!
//! `ES(t) = max(EF(p))` over resolved predecessors (0 with none), and
//! `EF(t) = ES(t) + duration(t)`. Dangling predecessor ids never reach the
//! graph, so they behave as dependencies that finished at time 0.

use crate::error::{AnalysisError, Pass};
use crate::graph::TaskGraph;
use crate::interner::TaskIdInt;
use crate::log_checks;
use crate::relaxation::relax;

/// Earliest times indexed by task ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardTimes {
    pub earliest_start: Vec<f64>,
    pub earliest_finish: Vec<f64>,
}

impl ForwardTimes {
    /// Project horizon: the largest earliest finish, 0 for an empty graph.
    pub fn horizon(&self) -> f64 {
        self.earliest_finish.iter().copied().fold(0.0, f64::max)
    }
}

/// Earliest start given the finishes computed so far.
///
/// Returns `None` if a predecessor has no finish yet.
fn start_from_predecessors(
    graph: &TaskGraph,
    task: TaskIdInt,
    finish: impl Fn(TaskIdInt) -> Option<f64>,
) -> Option<f64> {
    let mut start: f64 = 0.0;
    for &pred in &graph.preds[task as usize] {
        start = start.max(finish(pred)?);
    }
    Some(start)
}

/// Single sweep over a topological `order`.
pub fn forward_pass(graph: &TaskGraph, order: &[TaskIdInt], verbosity: u8) -> ForwardTimes {
    let n = graph.len();
    let mut earliest_start_vec = vec![0.0; n];
    let mut earliest_finish_vec: Vec<Option<f64>> = vec![None; n];

    for &task in order {
        let idx = task as usize;
        // Predecessors precede `task` in `order`, so every finish is known
        let start = start_from_predecessors(graph, task, |p| earliest_finish_vec[p as usize])
            .unwrap_or(0.0);
        let finish = start + graph.durations[idx];
        earliest_start_vec[idx] = start;
        earliest_finish_vec[idx] = Some(finish);

        log_checks!(
            verbosity,
            "forward: {} es={} ef={}",
            graph.id_of(task),
            start,
            finish
        );
    }

    ForwardTimes {
        earliest_start: earliest_start_vec,
        earliest_finish: earliest_finish_vec
            .into_iter()
            .map(|f| f.unwrap_or(0.0))
            .collect(),
    }
}

/// Work-list variant that needs no precomputed order.
///
/// # Returns
/// * `Err(AnalysisError::NonConvergence)` if some earliest finish stays
///   undefined (a cycle) or the iteration ceiling is exceeded
pub fn forward_relaxation(
    graph: &TaskGraph,
    verbosity: u8,
) -> Result<ForwardTimes, AnalysisError> {
    let n = graph.len();
    let times = relax(
        &graph.succs,
        0..n as TaskIdInt,
        Pass::Forward,
        verbosity,
        |task, values: &[Option<(f64, f64)>]| {
            let start =
                start_from_predecessors(graph, task, |p| values[p as usize].map(|(_, ef)| ef))?;
            Some((start, start + graph.durations[task as usize]))
        },
    )?;

    for (idx, &(start, finish)) in times.iter().enumerate() {
        log_checks!(
            verbosity,
            "forward: {} es={} ef={}",
            graph.id_of(idx as TaskIdInt),
            start,
            finish
        );
    }

    let (earliest_start, earliest_finish) = times.into_iter().unzip();
    Ok(ForwardTimes {
        earliest_start,
        earliest_finish,
    })
}
