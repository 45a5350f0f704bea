use crate::domain::{SelectionError, Task};

/// Pick the task to attach to.
///
/// - `requested` given: exact, case-sensitive match on the short task id.
/// - otherwise: the task with the latest start time. Missing or unreadable
///   start times count as the minimum, and the first task wins ties.
pub fn select_task<'a>(
    tasks: &'a [Task],
    requested: Option<&str>,
) -> Result<&'a Task, SelectionError> {
    if tasks.is_empty() {
        return Err(SelectionError::NoTasks);
    }

    if let Some(requested) = requested.filter(|r| !r.is_empty()) {
        return tasks
            .iter()
            .find(|t| t.id.as_str() == requested)
            .ok_or_else(|| {
                let mut available: Vec<String> =
                    tasks.iter().map(|t| t.id.as_str().to_string()).collect();
                available.sort();
                SelectionError::TaskNotFound {
                    requested: requested.to_string(),
                    available,
                }
            });
    }

    let mut best = &tasks[0];
    let mut best_at = best.started_at();
    for task in &tasks[1..] {
        let at = task.started_at();
        // strictly greater: the earlier task keeps ties
        if at > best_at {
            best = task;
            best_at = at;
        }
    }
    Ok(best)
}
