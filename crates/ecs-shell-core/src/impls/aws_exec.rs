//! `aws ecs execute-command --interactive` as an [`InteractiveExec`].

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Child;

use super::aws_cli::AwsCliConfig;
use crate::ports::{ExecError, ExecRequest, ExecStatus, InteractiveExec};

/// Time the child gets to exit on its own after Ctrl+C before it is killed.
const INTERRUPT_GRACE: Duration = Duration::from_millis(250);

pub struct AwsCliExec {
    config: AwsCliConfig,
}

impl AwsCliExec {
    pub fn new(config: AwsCliConfig) -> Self {
        Self { config }
    }

    pub fn args(request: &ExecRequest) -> Vec<String> {
        vec![
            "execute-command".to_string(),
            "--cluster".to_string(),
            request.cluster.to_string(),
            "--task".to_string(),
            request.task_id.to_string(),
            "--container".to_string(),
            request.container.clone(),
            "--command".to_string(),
            request.command.clone(),
            "--interactive".to_string(),
        ]
    }
}

#[async_trait]
impl InteractiveExec for AwsCliExec {
    async fn exec(&self, request: &ExecRequest) -> Result<ExecStatus, ExecError> {
        let args = Self::args(request);
        tracing::debug!(command = %self.config.display(&args), "starting session");

        let mut child = self
            .config
            .command(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|source| ExecError::Spawn {
                    program: self.config.program.clone(),
                    source,
                })?;
                if status.success() {
                    Ok(ExecStatus::Completed)
                } else {
                    Err(ExecError::Failed { status: status.to_string() })
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(ExecError::Signal)?;
                tracing::info!(task = %request.task_id, "session interrupted");
                reap(&mut child).await;
                Ok(ExecStatus::Interrupted)
            }
        }
    }
}

async fn reap(child: &mut Child) {
    if tokio::time::timeout(INTERRUPT_GRACE, child.wait()).await.is_ok() {
        return;
    }
    if let Err(e) = child.kill().await {
        tracing::warn!(error = %e, "failed to stop session process");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClusterName, TaskId};

    fn request() -> ExecRequest {
        ExecRequest {
            cluster: ClusterName::new("prod"),
            task_id: TaskId::new("0f1e2d"),
            container: "web".to_string(),
            command: "bash".to_string(),
        }
    }

    #[test]
    fn builds_execute_command_arguments() {
        assert_eq!(
            AwsCliExec::args(&request()),
            vec![
                "execute-command",
                "--cluster",
                "prod",
                "--task",
                "0f1e2d",
                "--container",
                "web",
                "--command",
                "bash",
                "--interactive",
            ]
        );
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let exec = AwsCliExec::new(AwsCliConfig::new("/nonexistent/aws-cli-for-tests"));
        let err = exec.exec(&request()).await.unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }
}
