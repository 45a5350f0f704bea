//! `aws` CLI backed implementation of [`EcsMetadata`].
//!
//! Each call shells out to `aws ecs <op> --output json` and decodes the result.
//! The CLI already follows `nextToken` for list operations, so every list
//! comes back complete.

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::process::Command;

use crate::domain::{
    ClusterName, ContainerDefinition, ContainerSummary, RawTimestamp, ServiceName,
    ServiceSummary, Task, TaskDefinition, TaskDefinitionRef, TaskId, last_segment,
};
use crate::ports::{EcsMetadata, MetadataError};

/// DescribeTasks accepts at most this many ids per call.
const DESCRIBE_TASKS_BATCH: usize = 100;

/// How to invoke the `aws` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsCliConfig {
    pub program: String,
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl Default for AwsCliConfig {
    fn default() -> Self {
        Self {
            program: "aws".to_string(),
            profile: None,
            region: None,
        }
    }
}

impl AwsCliConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Full argument list for `aws ecs <args...>`, global options appended.
    pub fn ecs_args(&self, args: &[String]) -> Vec<String> {
        let mut full = Vec::with_capacity(args.len() + 5);
        full.push("ecs".to_string());
        full.extend(args.iter().cloned());
        if let Some(profile) = &self.profile {
            full.push("--profile".to_string());
            full.push(profile.clone());
        }
        if let Some(region) = &self.region {
            full.push("--region".to_string());
            full.push(region.clone());
        }
        full
    }

    pub fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.ecs_args(args));
        cmd
    }

    pub fn display(&self, args: &[String]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.ecs_args(args));
        parts.join(" ")
    }
}

pub struct AwsCliMetadata {
    config: AwsCliConfig,
}

impl AwsCliMetadata {
    pub fn new(config: AwsCliConfig) -> Self {
        Self { config }
    }

    async fn run_json<T: DeserializeOwned>(&self, args: Vec<String>) -> Result<T, MetadataError> {
        let mut args = args;
        args.push("--output".to_string());
        args.push("json".to_string());

        let command = self.config.display(&args);
        tracing::debug!(%command, "running aws cli");

        let output = self
            .config
            .command(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| MetadataError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(%command, status = %output.status, "aws cli failed");
            return Err(MetadataError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr,
            });
        }

        decode(&command, &output.stdout)
    }
}

fn decode<T: DeserializeOwned>(command: &str, stdout: &[u8]) -> Result<T, MetadataError> {
    serde_json::from_slice(stdout).map_err(|source| MetadataError::Decode {
        command: command.to_string(),
        source,
    })
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl EcsMetadata for AwsCliMetadata {
    async fn list_clusters(&self) -> Result<Vec<ClusterName>, MetadataError> {
        let out: wire::ListClusters = self.run_json(args(&["list-clusters"])).await?;
        Ok(out
            .cluster_arns
            .iter()
            .map(|arn| ClusterName::new(last_segment(arn)))
            .collect())
    }

    async fn list_services(&self, cluster: &ClusterName) -> Result<Vec<ServiceName>, MetadataError> {
        let out: wire::ListServices = self
            .run_json(args(&["list-services", "--cluster", cluster.as_str()]))
            .await?;
        Ok(out
            .service_arns
            .iter()
            .map(|arn| ServiceName::new(last_segment(arn)))
            .collect())
    }

    async fn describe_service(
        &self,
        cluster: &ClusterName,
        service: &ServiceName,
    ) -> Result<ServiceSummary, MetadataError> {
        let out: wire::DescribeServices = self
            .run_json(args(&[
                "describe-services",
                "--cluster",
                cluster.as_str(),
                "--services",
                service.as_str(),
            ]))
            .await?;
        out.services
            .into_iter()
            .next()
            .map(ServiceSummary::from)
            .ok_or_else(|| MetadataError::ServiceNotFound {
                cluster: cluster.clone(),
                service: service.clone(),
            })
    }

    async fn list_tasks(
        &self,
        cluster: &ClusterName,
        service: &ServiceName,
    ) -> Result<Vec<TaskId>, MetadataError> {
        let out: wire::ListTasks = self
            .run_json(args(&[
                "list-tasks",
                "--cluster",
                cluster.as_str(),
                "--service-name",
                service.as_str(),
            ]))
            .await?;
        Ok(out.task_arns.iter().map(|arn| TaskId::from_arn(arn)).collect())
    }

    async fn describe_tasks(
        &self,
        cluster: &ClusterName,
        ids: &[TaskId],
    ) -> Result<Vec<Task>, MetadataError> {
        let mut tasks = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(DESCRIBE_TASKS_BATCH) {
            let mut a = args(&["describe-tasks", "--cluster", cluster.as_str(), "--tasks"]);
            a.extend(chunk.iter().map(|id| id.as_str().to_string()));
            let out: wire::DescribeTasks = self.run_json(a).await?;
            tasks.extend(out.tasks.into_iter().map(Task::from));
        }
        Ok(tasks)
    }

    async fn describe_task_definition(
        &self,
        reference: &TaskDefinitionRef,
    ) -> Result<TaskDefinition, MetadataError> {
        // family:revision, so the definition matches what the task is running
        let out: wire::DescribeTaskDefinition = self
            .run_json(args(&[
                "describe-task-definition",
                "--task-definition",
                reference.family_revision(),
            ]))
            .await?;
        Ok(out.task_definition.into())
    }
}

/// JSON shapes emitted by `aws ecs ... --output json`.
mod wire {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListClusters {
        #[serde(default)]
        pub cluster_arns: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListServices {
        #[serde(default)]
        pub service_arns: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ListTasks {
        #[serde(default)]
        pub task_arns: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DescribeServices {
        #[serde(default)]
        pub services: Vec<Service>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Service {
        pub service_name: String,
        #[serde(default)]
        pub task_definition: String,
        #[serde(default)]
        pub desired_count: u32,
        #[serde(default)]
        pub running_count: u32,
    }

    #[derive(Debug, Deserialize)]
    pub struct DescribeTasks {
        #[serde(default)]
        pub tasks: Vec<TaskDesc>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TaskDesc {
        pub task_arn: String,
        #[serde(default)]
        pub task_definition_arn: String,
        #[serde(default)]
        pub last_status: Option<String>,
        #[serde(default)]
        pub started_at: Option<RawTimestamp>,
        #[serde(default)]
        pub containers: Vec<Container>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Container {
        pub name: String,
        #[serde(default)]
        pub last_status: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DescribeTaskDefinition {
        pub task_definition: TaskDef,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TaskDef {
        #[serde(default)]
        pub task_definition_arn: String,
        #[serde(default)]
        pub family: String,
        #[serde(default)]
        pub revision: u32,
        #[serde(default)]
        pub container_definitions: Vec<ContainerDef>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ContainerDef {
        pub name: String,
        #[serde(default)]
        pub essential: Option<bool>,
    }
}

impl From<wire::Service> for ServiceSummary {
    fn from(s: wire::Service) -> Self {
        Self {
            name: ServiceName::new(s.service_name),
            task_definition: TaskDefinitionRef::new(s.task_definition),
            desired_count: s.desired_count,
            running_count: s.running_count,
        }
    }
}

impl From<wire::TaskDesc> for Task {
    fn from(t: wire::TaskDesc) -> Self {
        Self {
            id: TaskId::from_arn(&t.task_arn),
            task_definition: TaskDefinitionRef::new(t.task_definition_arn),
            started_at: t.started_at,
            last_status: t.last_status,
            containers: t
                .containers
                .into_iter()
                .map(|c| ContainerSummary {
                    name: c.name,
                    last_status: c.last_status,
                })
                .collect(),
        }
    }
}

impl From<wire::TaskDef> for TaskDefinition {
    fn from(d: wire::TaskDef) -> Self {
        Self {
            arn: d.task_definition_arn,
            family: d.family,
            revision: d.revision,
            container_definitions: d
                .container_definitions
                .into_iter()
                .map(|c| ContainerDefinition::new(c.name, c.essential.unwrap_or(false)))
                .collect(),
        }
    }
}
