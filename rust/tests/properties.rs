//! Schedule identities over generated acyclic projects.

use cpm_rust::{analyze, analyze_with_config, AnalysisConfig, PassStrategy, Task};
use proptest::prelude::*;

/// Rounding noise allowed when a value is rebuilt from other rounded values.
const TOLERANCE: f64 = 1e-9;

/// Whole or tenth-step durations, 0 included.
fn duration() -> impl Strategy<Value = f64> {
    prop_oneof![
        (0u32..10).prop_map(f64::from),
        (0u32..100).prop_map(|tenths| f64::from(tenths) / 10.0),
    ]
}

/// Tasks `t0..tn` where each may depend on any earlier task, listed in
/// either creation order or reversed.
fn project() -> impl Strategy<Value = Vec<Task>> {
    (1usize..14)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(duration(), n),
                prop::collection::vec(prop::collection::vec(any::<bool>(), n), n),
                any::<bool>(),
            )
        })
        .prop_map(|(durations, links, reversed)| {
            let mut tasks: Vec<Task> = durations
                .iter()
                .enumerate()
                .map(|(i, &d)| {
                    let preds = (0..i).filter(|&j| links[i][j]).map(|j| format!("t{j}"));
                    Task::new(format!("t{i}"), format!("Task {i}"), d)
                        .with_predecessors(preds)
                })
                .collect();
            if reversed {
                tasks.reverse();
            }
            tasks
        })
}

fn has_dependents(tasks: &[Task], id: &str) -> bool {
    tasks.iter().any(|t| t.predecessors.iter().any(|p| p == id))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn durations_link_start_and_finish(tasks in project()) {
        let result = analyze(&tasks).unwrap();
        for t in &result.tasks {
            prop_assert_eq!(t.earliest_finish, t.earliest_start + t.duration());
            prop_assert!((t.latest_finish - (t.latest_start + t.duration())).abs() < TOLERANCE);
        }
    }

    #[test]
    fn slack_formulas_agree(tasks in project()) {
        let result = analyze(&tasks).unwrap();
        for t in &result.tasks {
            prop_assert!(t.total_slack >= 0.0);
            prop_assert!((t.total_slack - (t.latest_start - t.earliest_start)).abs() < TOLERANCE);
            prop_assert!((t.total_slack - (t.latest_finish - t.earliest_finish)).abs() < TOLERANCE);
            prop_assert_eq!(t.is_critical, t.total_slack.abs() < 1e-5);
        }
    }

    #[test]
    fn sources_start_at_zero_and_sinks_have_matching_slack(tasks in project()) {
        let result = analyze(&tasks).unwrap();
        for t in &result.tasks {
            if t.task.predecessors.is_empty() {
                prop_assert_eq!(t.earliest_start, 0.0);
            }
            if !has_dependents(&tasks, t.id()) {
                prop_assert_eq!(t.latest_finish, t.earliest_finish);
                prop_assert!((t.free_slack - t.total_slack).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn horizon_is_reached_by_a_critical_task(tasks in project()) {
        let result = analyze(&tasks).unwrap();
        let max_finish = result
            .tasks
            .iter()
            .map(|t| t.earliest_finish)
            .fold(0.0, f64::max);
        prop_assert_eq!(result.project_duration, max_finish);
        prop_assert!(result
            .critical_tasks()
            .any(|t| t.earliest_finish == result.project_duration));
    }

    #[test]
    fn critical_paths_are_linked_chains(tasks in project()) {
        let result = analyze(&tasks).unwrap();
        prop_assert!(!result.critical_path_ids.is_empty());
        for path in &result.critical_path_ids {
            for id in path {
                prop_assert!(result.task(id).unwrap().is_critical);
            }
            for pair in path.windows(2) {
                let next = result.task(&pair[1]).unwrap();
                prop_assert!(next.task.predecessors.contains(&pair[0]));
            }
        }
    }

    #[test]
    fn reanalysis_is_idempotent(tasks in project()) {
        let first = analyze(&tasks).unwrap();
        let second = analyze(&first.source_tasks()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn relaxation_matches_topological(tasks in project()) {
        let config = AnalysisConfig {
            strategy: PassStrategy::Relaxation,
            ..AnalysisConfig::default()
        };
        let topological = analyze(&tasks).unwrap();
        let relaxed = analyze_with_config(&tasks, &config).unwrap();
        prop_assert_eq!(topological, relaxed);
    }
}
