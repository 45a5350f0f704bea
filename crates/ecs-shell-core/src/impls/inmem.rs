//! In-memory ports for development and tests.
//!
//! `InMemoryMetadata` は固定のクラスタ構成を返し、`RecordingExec` は
//! 受け取った ExecRequest を記録するだけで何も起動しません。

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ClusterName, ServiceName, ServiceSummary, Task, TaskDefinition, TaskDefinitionRef, TaskId,
};
use crate::ports::{
    EcsMetadata, ExecError, ExecRequest, ExecStatus, InteractiveExec, MetadataError,
};

#[derive(Debug, Default)]
struct ServiceFixture {
    summary: Option<ServiceSummary>,
    tasks: Vec<Task>,
}

/// Fixed cluster layout served from memory.
#[derive(Debug, Default)]
pub struct InMemoryMetadata {
    clusters: BTreeMap<ClusterName, BTreeMap<ServiceName, ServiceFixture>>,
    definitions: HashMap<String, TaskDefinition>,
    broken_clusters: BTreeSet<ClusterName>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster(mut self, cluster: impl Into<ClusterName>) -> Self {
        self.clusters.entry(cluster.into()).or_default();
        self
    }

    /// Register a service. Without this, `describe_service` fails for it.
    pub fn with_service(mut self, cluster: impl Into<ClusterName>, summary: ServiceSummary) -> Self {
        let fixture = self
            .clusters
            .entry(cluster.into())
            .or_default()
            .entry(summary.name.clone())
            .or_default();
        fixture.summary = Some(summary);
        self
    }

    /// Add a running task to a service (the service is listed even if never described).
    pub fn with_task(
        mut self,
        cluster: impl Into<ClusterName>,
        service: impl Into<ServiceName>,
        task: Task,
    ) -> Self {
        self.clusters
            .entry(cluster.into())
            .or_default()
            .entry(service.into())
            .or_default()
            .tasks
            .push(task);
        self
    }

    /// Keyed by `family:revision`.
    pub fn with_definition(mut self, definition: TaskDefinition) -> Self {
        let key = format!("{}:{}", definition.family, definition.revision);
        self.definitions.insert(key, definition);
        self
    }

    /// Make `list_services` fail for this cluster.
    pub fn with_broken_cluster(mut self, cluster: impl Into<ClusterName>) -> Self {
        let cluster = cluster.into();
        self.clusters.entry(cluster.clone()).or_default();
        self.broken_clusters.insert(cluster);
        self
    }

    /// Operations served so far, e.g. `describe_task_definition web:3`.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: String) {
        self.calls.lock().await.push(call);
    }

    fn service(
        &self,
        cluster: &ClusterName,
        service: &ServiceName,
    ) -> Result<&ServiceFixture, MetadataError> {
        self.clusters
            .get(cluster)
            .and_then(|services| services.get(service))
            .ok_or_else(|| MetadataError::ServiceNotFound {
                cluster: cluster.clone(),
                service: service.clone(),
            })
    }
}

#[async_trait]
impl EcsMetadata for InMemoryMetadata {
    async fn list_clusters(&self) -> Result<Vec<ClusterName>, MetadataError> {
        self.record("list_clusters".to_string()).await;
        Ok(self.clusters.keys().cloned().collect())
    }

    async fn list_services(&self, cluster: &ClusterName) -> Result<Vec<ServiceName>, MetadataError> {
        self.record(format!("list_services {cluster}")).await;
        if self.broken_clusters.contains(cluster) {
            return Err(MetadataError::NotFound(format!("Cluster '{cluster}' is unavailable")));
        }
        self.clusters
            .get(cluster)
            .map(|services| services.keys().cloned().collect())
            .ok_or_else(|| MetadataError::NotFound(format!("Cluster '{cluster}' not found")))
    }

    async fn describe_service(
        &self,
        cluster: &ClusterName,
        service: &ServiceName,
    ) -> Result<ServiceSummary, MetadataError> {
        self.record(format!("describe_service {cluster} {service}")).await;
        self.service(cluster, service)?
            .summary
            .clone()
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
        self.record(format!("list_tasks {cluster} {service}")).await;
        Ok(self
            .service(cluster, service)
            .map(|s| s.tasks.iter().map(|t| t.id.clone()).collect())
            .unwrap_or_default())
    }

    async fn describe_tasks(
        &self,
        cluster: &ClusterName,
        ids: &[TaskId],
    ) -> Result<Vec<Task>, MetadataError> {
        self.record(format!("describe_tasks {cluster} {}", ids.len())).await;
        let wanted: BTreeSet<&TaskId> = ids.iter().collect();
        let tasks = self
            .clusters
            .get(cluster)
            .into_iter()
            .flat_map(|services| services.values())
            .flat_map(|s| s.tasks.iter())
            .filter(|t| wanted.contains(&t.id))
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn describe_task_definition(
        &self,
        reference: &TaskDefinitionRef,
    ) -> Result<TaskDefinition, MetadataError> {
        let key = reference.family_revision();
        self.record(format!("describe_task_definition {key}")).await;
        self.definitions
            .get(key)
            .cloned()
            .ok_or_else(|| MetadataError::NotFound(format!("Task definition '{key}' not found")))
    }
}

/// Records every request and answers with a fixed status.
pub struct RecordingExec {
    status: ExecStatus,
    requests: Mutex<Vec<ExecRequest>>,
}

impl RecordingExec {
    pub fn new(status: ExecStatus) -> Self {
        Self {
            status,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn requests(&self) -> Vec<ExecRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for RecordingExec {
    fn default() -> Self {
        Self::new(ExecStatus::Completed)
    }
}

#[async_trait]
impl InteractiveExec for RecordingExec {
    async fn exec(&self, request: &ExecRequest) -> Result<ExecStatus, ExecError> {
        self.requests.lock().await.push(request.clone());
        Ok(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContainerSummary;

    fn task(id: &str) -> Task {
        Task::new(id, TaskDefinitionRef::new("web:1")).with_container(ContainerSummary::new("web"))
    }

    #[tokio::test]
    async fn lists_and_describes_tasks_per_service() {
        let meta = InMemoryMetadata::new()
            .with_task("prod", "api", task("a"))
            .with_task("prod", "api", task("b"))
            .with_task("prod", "worker", task("c"));

        let cluster = ClusterName::new("prod");
        let ids = meta.list_tasks(&cluster, &ServiceName::new("api")).await.unwrap();
        assert_eq!(ids, vec![TaskId::new("a"), TaskId::new("b")]);

        let tasks = meta.describe_tasks(&cluster, &ids).await.unwrap();
        assert_eq!(tasks.len(), 2);

        let none = meta.list_tasks(&cluster, &ServiceName::new("nope")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn unknown_definition_is_not_found() {
        let meta = InMemoryMetadata::new().with_definition(TaskDefinition::new("web", 1));
        assert!(meta
            .describe_task_definition(&TaskDefinitionRef::new("task-definition/web:1"))
            .await
            .is_ok());
        let err = meta
            .describe_task_definition(&TaskDefinitionRef::new("web:2"))
            .await
            .unwrap_err();
        assert!(matches!(err, MetadataError::NotFound(_)));
        assert_eq!(
            meta.calls().await,
            vec!["describe_task_definition web:1", "describe_task_definition web:2"]
        );
    }

    #[tokio::test]
    async fn recording_exec_keeps_requests() {
        let exec = RecordingExec::new(ExecStatus::Interrupted);
        let req = ExecRequest {
            cluster: ClusterName::new("prod"),
            task_id: TaskId::new("a"),
            container: "web".into(),
            command: "sh".into(),
        };
        assert_eq!(exec.exec(&req).await.unwrap(), ExecStatus::Interrupted);
        assert_eq!(exec.requests().await, vec![req]);
    }
}
