use std::collections::BTreeSet;

use crate::domain::{SelectionError, Task, TaskDefinition};

/// Pick the container to attach to within `task`.
///
/// Order of rules:
/// 1. an explicit `requested` name always wins (if the task has it)
/// 2. a task with a single container needs no decision
/// 3. exactly one container that is both running and essential in `definition`
///
/// Anything else is ambiguous and the caller has to name the container.
pub fn select_container(
    task: &Task,
    definition: &TaskDefinition,
    requested: Option<&str>,
) -> Result<String, SelectionError> {
    let available: BTreeSet<&str> = task.container_names().collect();
    let sorted = || available.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    if let Some(requested) = requested.filter(|r| !r.is_empty()) {
        if available.contains(requested) {
            return Ok(requested.to_string());
        }
        return Err(SelectionError::ContainerNotFound {
            requested: requested.to_string(),
            available: sorted(),
        });
    }

    match available.len() {
        0 => return Err(SelectionError::NoContainers),
        1 => return Ok(sorted().remove(0)),
        _ => {}
    }

    // essential only counts for containers that are actually on the task
    let essential: BTreeSet<&str> = definition
        .essential_names()
        .filter(|name| available.contains(name))
        .collect();

    match essential.into_iter().collect::<Vec<_>>().as_slice() {
        [only] => Ok(only.to_string()),
        _ => Err(SelectionError::AmbiguousContainer {
            available: sorted(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContainerDefinition, ContainerSummary, ErrorKind, TaskDefinitionRef};
    use rstest::rstest;

    fn task_with(names: &[&str]) -> Task {
        names.iter().fold(
            Task::new("t1", TaskDefinitionRef::new("web:1")),
            |t, n| t.with_container(ContainerSummary::new(*n)),
        )
    }

    fn definition(defs: &[(&str, bool)]) -> TaskDefinition {
        defs.iter().fold(TaskDefinition::new("web", 1), |d, (n, e)| {
            d.with_container(ContainerDefinition::new(*n, *e))
        })
    }

    #[rstest]
    #[case::not_essential(&[("web", false)])]
    #[case::other_container_essential(&[("web", false), ("migrate", true)])]
    #[case::no_definitions(&[])]
    fn single_container_is_chosen_whatever_the_definition_says(#[case] defs: &[(&str, bool)]) {
        let got = select_container(&task_with(&["web"]), &definition(defs), None).unwrap();
        assert_eq!(got, "web");
    }

    #[test]
    fn single_essential_running_container_is_chosen() {
        let got = select_container(
            &task_with(&["web", "sidecar"]),
            &definition(&[("web", true), ("sidecar", false)]),
            None,
        )
        .unwrap();
        assert_eq!(got, "web");
    }

    #[test]
    fn essential_definition_without_running_container_does_not_count() {
        // "migrate" is essential but not on the task, so only "web" remains
        let got = select_container(
            &task_with(&["web", "sidecar"]),
            &definition(&[("web", true), ("migrate", true), ("sidecar", false)]),
            None,
        )
        .unwrap();
        assert_eq!(got, "web");
    }

    #[rstest]
    #[case::both_essential(&[("web", true), ("sidecar", true)])]
    #[case::none_essential(&[("web", false), ("sidecar", false)])]
    #[case::only_missing_container_essential(&[("migrate", true)])]
    fn zero_or_many_essentials_is_ambiguous(#[case] defs: &[(&str, bool)]) {
        let err =
            select_container(&task_with(&["web", "sidecar"]), &definition(defs), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Ambiguous);
        assert_eq!(
            err,
            SelectionError::AmbiguousContainer {
                available: vec!["sidecar".into(), "web".into()],
            }
        );
    }

    #[test]
    fn explicit_name_short_circuits_essential_logic() {
        let got = select_container(
            &task_with(&["web", "sidecar"]),
            &definition(&[("web", true), ("sidecar", false)]),
            Some("sidecar"),
        )
        .unwrap();
        assert_eq!(got, "sidecar");
    }

    #[test]
    fn explicit_name_not_on_task_lists_sorted_alternatives() {
        let err = select_container(
            &task_with(&["web", "sidecar", "agent"]),
            &definition(&[("web", true)]),
            Some("db"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "Container 'db' not found in task. Available containers: agent, sidecar, web"
        );
    }

    #[test]
    fn task_without_containers_is_not_found() {
        let err = select_container(&task_with(&[]), &definition(&[("web", true)]), None)
            .unwrap_err();
        assert_eq!(err, SelectionError::NoContainers);
    }

    #[test]
    fn explicit_name_on_empty_task_is_not_found() {
        let err = select_container(&task_with(&[]), &definition(&[]), Some("web")).unwrap_err();
        assert_eq!(
            err,
            SelectionError::ContainerNotFound {
                requested: "web".into(),
                available: vec![],
            }
        );
    }
}
