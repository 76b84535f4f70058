//! Slack and criticality from the two passes.

use crate::backward_pass::BackwardTimes;
use crate::forward_pass::ForwardTimes;
use crate::graph::TaskGraph;
use crate::interner::TaskIdInt;
use crate::log_checks;

/// Per-task timing information after both passes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: f64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: f64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: f64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: f64,
    /// `latest_start - earliest_start`, never negative.
    pub total_slack: f64,
    /// Room before the earliest dependent start, never negative.
    pub free_slack: f64,
    pub is_critical: bool,
}

/// Total slack with negative noise clamped away.
fn total_slack(earliest_start: f64, latest_start: f64) -> f64 {
    (latest_start - earliest_start).max(0.0)
}

/// Free slack: gap to the earliest dependent start.
///
/// A sink measures against its own latest finish, which equals its earliest
/// finish, so a sink's free slack always matches its total slack.
fn free_slack(
    graph: &TaskGraph,
    forward: &ForwardTimes,
    backward: &BackwardTimes,
    task: TaskIdInt,
) -> f64 {
    let idx = task as usize;
    let next_start = graph.succs[idx]
        .iter()
        .map(|&s| forward.earliest_start[s as usize])
        .reduce(f64::min)
        .unwrap_or(backward.latest_finish[idx]);
    (next_start - forward.earliest_finish[idx]).max(0.0)
}

/// Combine pass results into per-task timings.
///
/// A task is critical when its total slack is within `epsilon` of zero.
pub fn derive_timings(
    graph: &TaskGraph,
    forward: &ForwardTimes,
    backward: &BackwardTimes,
    epsilon: f64,
    verbosity: u8,
) -> Vec<TaskTiming> {
    (0..graph.len())
        .map(|idx| {
            let task = idx as TaskIdInt;
            let total = total_slack(forward.earliest_start[idx], backward.latest_start[idx]);
            let timing = TaskTiming {
                earliest_start: forward.earliest_start[idx],
                earliest_finish: forward.earliest_finish[idx],
                latest_start: backward.latest_start[idx],
                latest_finish: backward.latest_finish[idx],
                total_slack: total,
                free_slack: free_slack(graph, forward, backward, task),
                is_critical: total.abs() < epsilon,
            };
            log_checks!(
                verbosity,
                "slack: {} total={} free={} critical={}",
                graph.id_of(task),
                timing.total_slack,
                timing.free_slack,
                timing.is_critical
            );
            timing
        })
        .collect()
}
