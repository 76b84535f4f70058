//! Validated, index-based view of a task list.
//!
//! Built once per analysis call. All later stages work on `TaskIdInt`
//! indices with direct array access; strings only appear at the boundaries.

use rustc_hash::FxHashSet;

use crate::error::{AnalysisError, InvalidTaskReason};
use crate::interner::{TaskIdInt, TaskIdInterner};
use crate::models::{Task, Warning};

/// Dependency graph of one task list, indexed by input position.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    /// Task ID string <-> integer mapping.
    pub index: TaskIdInterner,
    /// Task durations indexed by task ID.
    pub durations: Vec<f64>,
    /// Resolved predecessors, deduplicated, in listed order.
    pub preds: Vec<Vec<TaskIdInt>>,
    /// Dependents, in input order of the dependent task.
    pub succs: Vec<Vec<TaskIdInt>>,
    /// Predecessor ids that name no task in the list.
    pub dangling: Vec<Warning>,
}

impl TaskGraph {
    /// Validate `tasks` and build the adjacency lists.
    ///
    /// Fails on the first invalid task; dangling predecessor ids are dropped
    /// from the graph and recorded in `dangling`.
    pub fn build(tasks: &[Task]) -> Result<Self, AnalysisError> {
        let n = tasks.len();
        let mut index = TaskIdInterner::with_capacity(n);
        let mut durations = Vec::with_capacity(n);

        for task in tasks {
            validate_task(task)?;
            if index.insert_new(&task.id).is_none() {
                return Err(invalid(task, InvalidTaskReason::DuplicateId));
            }
            durations.push(task.duration);
        }

        let mut preds: Vec<Vec<TaskIdInt>> = vec![Vec::new(); n];
        let mut succs: Vec<Vec<TaskIdInt>> = vec![Vec::new(); n];
        let mut dangling = Vec::new();

        for (idx, task) in tasks.iter().enumerate() {
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            for pred_id in &task.predecessors {
                if !seen.insert(pred_id.as_str()) {
                    continue;
                }
                match index.get(pred_id) {
                    Some(pred) => {
                        preds[idx].push(pred);
                        succs[pred as usize].push(idx as TaskIdInt);
                    }
                    None => {
                        let warning = Warning::DanglingReference {
                            task_id: task.id.clone(),
                            missing_id: pred_id.clone(),
                        };
                        log::warn!("{}", warning);
                        dangling.push(warning);
                    }
                }
            }
        }

        Ok(Self {
            index,
            durations,
            preds,
            succs,
            dangling,
        })
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Number of resolved predecessor edges.
    pub fn edge_count(&self) -> usize {
        self.preds.iter().map(Vec::len).sum()
    }

    /// A sink has no dependents.
    #[inline]
    pub fn is_sink(&self, id: TaskIdInt) -> bool {
        self.succs[id as usize].is_empty()
    }

    pub fn id_of(&self, id: TaskIdInt) -> &str {
        self.index.resolve(id).unwrap_or_default()
    }
}

fn invalid(task: &Task, reason: InvalidTaskReason) -> AnalysisError {
    AnalysisError::InvalidTask {
        task_id: task.id.clone(),
        reason,
    }
}

fn validate_task(task: &Task) -> Result<(), AnalysisError> {
    if task.id.is_empty() {
        return Err(invalid(task, InvalidTaskReason::EmptyId));
    }
    if task.name.trim().is_empty() {
        return Err(invalid(task, InvalidTaskReason::EmptyName));
    }
    if !task.duration.is_finite() {
        return Err(invalid(task, InvalidTaskReason::NonFiniteDuration));
    }
    if task.duration < 0.0 {
        return Err(invalid(
            task,
            InvalidTaskReason::NegativeDuration(task.duration),
        ));
    }
    if task.predecessors.iter().any(|p| p == &task.id) {
        return Err(invalid(task, InvalidTaskReason::SelfDependency));
    }
    Ok(())
}
