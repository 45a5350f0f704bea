//! ecs-shell - open an interactive shell in a running ECS task.

mod args;
mod table;

use std::process::ExitCode;

use args::Args;
use clap::Parser;
use ecs_shell_core::ShellError;
use ecs_shell_core::app::{ClusterOverview, Resolution, RunOutcome, ShellPipeline, ShellRequest};
use ecs_shell_core::select::Selection;
use ecs_shell_core::impls::{AwsCliExec, AwsCliMetadata};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.default_log_level())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("{e:?}");
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.aws_config();
    let metadata = AwsCliMetadata::new(config.clone());

    let Some(request) = args.shell_request() else {
        return show_overview(&metadata).await;
    };

    let pipeline = ShellPipeline::new(metadata, AwsCliExec::new(config));
    let outcome = match pipeline.resolve(&request).await {
        Ok(Resolution::NoTasks) => Ok(RunOutcome::NoTasks),
        Ok(Resolution::Resolved(selection)) => {
            println!("{}", connect_notice(&request, &selection));
            pipeline.handoff(&request, selection).await
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(outcome) => {
            if let Some(message) = report(&request, &outcome) {
                println!("{message}");
            }
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(describe_error(&e))),
    }
}

async fn show_overview(metadata: &AwsCliMetadata) -> anyhow::Result<()> {
    let rows = ClusterOverview::new(metadata)
        .rows()
        .await
        .map_err(|e| anyhow::anyhow!("AWS Error: {e}"))?;
    if rows.is_empty() {
        println!("No ECS clusters found");
    } else {
        print!("{}", table::render(&rows));
    }
    Ok(())
}

/// Printed right before the session is opened.
fn connect_notice(request: &ShellRequest, selection: &Selection) -> String {
    format!(
        "Connecting to container '{}' in task '{}' on cluster '{}'...\nExecuting command: {}",
        selection.container, selection.task_id, request.cluster, request.command
    )
}

/// Message for the outcomes that still exit 0.
fn report(request: &ShellRequest, outcome: &RunOutcome) -> Option<String> {
    match outcome {
        RunOutcome::NoTasks => Some(format!(
            "No running tasks found for service '{}' in cluster '{}'",
            request.service, request.cluster
        )),
        RunOutcome::Completed(_) => None,
        RunOutcome::Interrupted(_) => Some(
            "\nCommand interrupted with CTRL+C. The shell session has been terminated.\n\
             You can run the script again to start a new session."
                .to_string(),
        ),
    }
}

fn describe_error(e: &ShellError) -> String {
    match e {
        ShellError::Selection(e) => format!("Error: {e}"),
        ShellError::Metadata(e) => format!("AWS Error: {e}"),
        ShellError::Exec(e) => format!("Failed to execute command: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecs_shell_core::domain::{SelectionError, TaskId};
    use ecs_shell_core::ports::{ExecError, MetadataError};

    #[test]
    fn errors_are_prefixed_by_origin() {
        let e = ShellError::from(SelectionError::NoContainers);
        assert_eq!(describe_error(&e), "Error: No containers found in task");

        let e = ShellError::from(MetadataError::NotFound("gone".into()));
        assert_eq!(describe_error(&e), "AWS Error: gone");

        let e = ShellError::from(ExecError::Failed {
            status: "exit status: 255".into(),
        });
        assert_eq!(
            describe_error(&e),
            "Failed to execute command: command exited with exit status: 255"
        );
    }

    fn selection() -> Selection {
        Selection {
            task_id: TaskId::new("0f1e2d"),
            container: "web".into(),
        }
    }

    #[test]
    fn connect_notice_names_container_task_cluster_and_command() {
        let request = ShellRequest::new("prod", "api").with_command("sh -l");
        assert_eq!(
            connect_notice(&request, &selection()),
            "Connecting to container 'web' in task '0f1e2d' on cluster 'prod'...\n\
             Executing command: sh -l"
        );
    }

    #[test]
    fn no_tasks_names_service_and_cluster() {
        let request = ShellRequest::new("prod", "api");
        assert_eq!(
            report(&request, &RunOutcome::NoTasks).as_deref(),
            Some("No running tasks found for service 'api' in cluster 'prod'")
        );
    }

    #[test]
    fn interrupt_prints_two_line_notice() {
        let request = ShellRequest::new("prod", "api");
        let message = report(&request, &RunOutcome::Interrupted(selection())).unwrap();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(
            lines,
            vec![
                "",
                "Command interrupted with CTRL+C. The shell session has been terminated.",
                "You can run the script again to start a new session.",
            ]
        );
    }

    #[test]
    fn completed_session_prints_nothing() {
        let request = ShellRequest::new("prod", "api");
        assert!(report(&request, &RunOutcome::Completed(selection())).is_none());
    }
}
