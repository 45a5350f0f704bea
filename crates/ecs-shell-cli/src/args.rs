//! CLI argument parsing.

use clap::{ArgAction, Parser};
use ecs_shell_core::app::{DEFAULT_SHELL, ShellRequest};
use ecs_shell_core::impls::AwsCliConfig;

/// Open an interactive shell to an AWS ECS task.
///
/// Without CLUSTER_NAME and SERVICE_NAME, prints every cluster and service instead.
#[derive(Parser, Debug)]
#[command(name = "ecs-shell", version, about)]
pub struct Args {
    /// Name of the ECS cluster
    #[arg(value_name = "CLUSTER_NAME")]
    pub cluster: Option<String>,

    /// Name of the ECS service
    #[arg(value_name = "SERVICE_NAME")]
    pub service: Option<String>,

    /// Task ID to connect to (defaults to most recently started task)
    #[arg(short, long)]
    pub task: Option<String>,

    /// Container name to connect to (determined automatically if possible)
    #[arg(short, long)]
    pub container: Option<String>,

    /// Shell or command to execute
    #[arg(short, long, default_value = DEFAULT_SHELL)]
    pub shell: String,

    /// Path to the aws CLI
    #[arg(long, env = "ECS_SHELL_AWS_BIN", default_value = "aws")]
    pub aws_bin: String,

    /// AWS profile passed to the aws CLI
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// AWS region passed to the aws CLI
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn aws_config(&self) -> AwsCliConfig {
        AwsCliConfig::new(self.aws_bin.clone())
            .with_profile(self.profile.clone())
            .with_region(self.region.clone())
    }

    /// `None` when cluster or service is missing (overview mode).
    pub fn shell_request(&self) -> Option<ShellRequest> {
        let cluster = self.cluster.as_deref().filter(|s| !s.is_empty())?;
        let service = self.service.as_deref().filter(|s| !s.is_empty())?;

        let mut request = ShellRequest::new(cluster, service).with_command(self.shell.clone());
        request.task_id = self.task.clone().filter(|s| !s.is_empty());
        request.container = self.container.clone().filter(|s| !s.is_empty());
        Some(request)
    }

    pub fn default_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
