//! Chart-ready data derived from an analysis.
//!
//! These are plain data shapes for Gantt and network (PERT) diagrams; the
//! engine does no rendering.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::models::Analysis;

/// One bar on a Gantt chart, placed at the earliest schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttBar {
    pub id: String,
    pub name: String,
    pub start: f64,
    pub end: f64,
    /// How far the bar may slide right before delaying the project.
    pub latest_finish: f64,
    pub predecessors: Vec<String>,
    pub is_critical: bool,
    /// Zero-length bar, drawn as a marker.
    pub is_milestone: bool,
    pub slack: f64,
}

/// A task node of a network diagram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    pub id: String,
    pub name: String,
    pub duration: f64,
    pub earliest_start: f64,
    pub earliest_finish: f64,
    pub latest_start: f64,
    pub latest_finish: f64,
    pub total_slack: f64,
    pub free_slack: f64,
    pub is_critical: bool,
}

/// A finish-to-start edge: `from` must finish before `to` starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkLink {
    pub from: String,
    pub to: String,
    /// Both ends are critical.
    pub is_critical: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDiagram {
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkLink>,
}

/// Predecessor ids that name a known task, deduplicated, in listed order.
fn resolved_predecessors<'a>(
    known: &FxHashSet<&str>,
    predecessors: &'a [String],
) -> Vec<&'a str> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    predecessors
        .iter()
        .map(String::as_str)
        .filter(|&p| known.contains(p) && seen.insert(p))
        .collect()
}

fn known_ids(analysis: &Analysis) -> FxHashSet<&str> {
    analysis.tasks.iter().map(|t| t.id()).collect()
}

/// Gantt bars in task order.
pub fn gantt_bars(analysis: &Analysis) -> Vec<GanttBar> {
    let known = known_ids(analysis);
    analysis
        .tasks
        .iter()
        .map(|t| GanttBar {
            id: t.id().to_string(),
            name: t.name().to_string(),
            start: t.earliest_start,
            end: t.earliest_finish,
            latest_finish: t.latest_finish,
            predecessors: resolved_predecessors(&known, &t.task.predecessors)
                .into_iter()
                .map(str::to_string)
                .collect(),
            is_critical: t.is_critical,
            is_milestone: t.task.is_milestone(),
            slack: t.total_slack,
        })
        .collect()
}

/// Nodes in task order; links grouped by dependent, in listed order.
pub fn network_diagram(analysis: &Analysis) -> NetworkDiagram {
    let known = known_ids(analysis);

    let nodes = analysis
        .tasks
        .iter()
        .map(|t| NetworkNode {
            id: t.id().to_string(),
            name: t.name().to_string(),
            duration: t.duration(),
            earliest_start: t.earliest_start,
            earliest_finish: t.earliest_finish,
            latest_start: t.latest_start,
            latest_finish: t.latest_finish,
            total_slack: t.total_slack,
            free_slack: t.free_slack,
            is_critical: t.is_critical,
        })
        .collect();

    let links = analysis
        .tasks
        .iter()
        .flat_map(|t| {
            resolved_predecessors(&known, &t.task.predecessors)
                .into_iter()
                .map(move |pred| NetworkLink {
                    from: pred.to_string(),
                    to: t.id().to_string(),
                    is_critical: t.is_critical
                        && analysis.task(pred).is_some_and(|p| p.is_critical),
                })
        })
        .collect();

    NetworkDiagram { nodes, links }
}
