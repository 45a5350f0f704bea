//! ShellPipeline - タスク取得 → タスク選択 → 定義取得 → コンテナ選択 → exec
//!
//! 各ステップは前のステップの結果に依存するため、完全に逐次実行します。
//! セレクタのエラーはそのまま呼び出し元へ返し、リトライはしません。

use crate::domain::{ClusterName, ServiceName};
use crate::error::ShellError;
use crate::ports::{EcsMetadata, ExecRequest, ExecStatus, InteractiveExec};
use crate::select::{Selection, select_container, select_task};

pub const DEFAULT_SHELL: &str = "bash";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRequest {
    pub cluster: ClusterName,
    pub service: ServiceName,
    pub task_id: Option<String>,
    pub container: Option<String>,
    pub command: String,
}

impl ShellRequest {
    pub fn new(cluster: impl Into<ClusterName>, service: impl Into<ServiceName>) -> Self {
        Self {
            cluster: cluster.into(),
            service: service.into(),
            task_id: None,
            container: None,
            command: DEFAULT_SHELL.to_string(),
        }
    }

    pub fn with_task(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The service has no running tasks. Not an error.
    NoTasks,
    Resolved(Selection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NoTasks,
    Completed(Selection),
    Interrupted(Selection),
}

pub struct ShellPipeline<M, E> {
    metadata: M,
    exec: E,
}

impl<M: EcsMetadata, E: InteractiveExec> ShellPipeline<M, E> {
    pub fn new(metadata: M, exec: E) -> Self {
        Self { metadata, exec }
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    pub fn exec(&self) -> &E {
        &self.exec
    }

    /// Pick the task and container without opening a session.
    #[tracing::instrument(skip_all, fields(cluster = %request.cluster, service = %request.service))]
    pub async fn resolve(&self, request: &ShellRequest) -> Result<Resolution, ShellError> {
        let ids = self
            .metadata
            .list_tasks(&request.cluster, &request.service)
            .await?;
        if ids.is_empty() {
            tracing::info!("service has no running tasks");
            return Ok(Resolution::NoTasks);
        }

        let tasks = self.metadata.describe_tasks(&request.cluster, &ids).await?;
        if tasks.is_empty() {
            // listed tasks can stop before they are described
            tracing::info!(listed = ids.len(), "listed tasks are gone");
            return Ok(Resolution::NoTasks);
        }

        let task = select_task(&tasks, request.task_id.as_deref())?;
        tracing::debug!(task = %task.id, candidates = tasks.len(), "task selected");

        let definition = self
            .metadata
            .describe_task_definition(&task.task_definition)
            .await?;
        let container = select_container(task, &definition, request.container.as_deref())?;
        tracing::debug!(task = %task.id, %container, "container selected");

        Ok(Resolution::Resolved(Selection {
            task_id: task.id.clone(),
            container,
        }))
    }

    /// Resolve, then hand the selection to the exec side.
    pub async fn run(&self, request: &ShellRequest) -> Result<RunOutcome, ShellError> {
        match self.resolve(request).await? {
            Resolution::NoTasks => Ok(RunOutcome::NoTasks),
            Resolution::Resolved(selection) => self.handoff(request, selection).await,
        }
    }

    /// Open the session for an already resolved selection.
    pub async fn handoff(
        &self,
        request: &ShellRequest,
        selection: Selection,
    ) -> Result<RunOutcome, ShellError> {
        tracing::info!(
            cluster = %request.cluster,
            task = %selection.task_id,
            container = %selection.container,
            command = %request.command,
            "opening session"
        );

        let exec_request = ExecRequest {
            cluster: request.cluster.clone(),
            task_id: selection.task_id.clone(),
            container: selection.container.clone(),
            command: request.command.clone(),
        };

        match self.exec.exec(&exec_request).await? {
            ExecStatus::Completed => Ok(RunOutcome::Completed(selection)),
            ExecStatus::Interrupted => Ok(RunOutcome::Interrupted(selection)),
        }
    }
}
