//! EcsMetadata port - クラスタ・サービス・タスクの参照

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    ClusterName, ServiceName, ServiceSummary, Task, TaskDefinition, TaskDefinitionRef, TaskId,
};

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("could not decode output of `{command}`: {source}")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Service '{service}' not found in cluster '{cluster}'")]
    ServiceNotFound {
        cluster: ClusterName,
        service: ServiceName,
    },

    /// Lookup miss with no structured variant above. The `aws` CLI reports
    /// misses as `CommandFailed`, so only `InMemoryMetadata` builds this.
    #[error("{0}")]
    NotFound(String),
}

/// Read-only view of the orchestration control plane.
///
/// Every list is fully materialized; pagination is the implementation's concern.
/// Identifiers may come back as full ARNs and are normalized by the callers.
#[async_trait]
pub trait EcsMetadata: Send + Sync {
    async fn list_clusters(&self) -> Result<Vec<ClusterName>, MetadataError>;

    async fn list_services(&self, cluster: &ClusterName) -> Result<Vec<ServiceName>, MetadataError>;

    async fn describe_service(
        &self,
        cluster: &ClusterName,
        service: &ServiceName,
    ) -> Result<ServiceSummary, MetadataError>;

    /// Running task ids of a service. May be empty.
    async fn list_tasks(
        &self,
        cluster: &ClusterName,
        service: &ServiceName,
    ) -> Result<Vec<TaskId>, MetadataError>;

    async fn describe_tasks(
        &self,
        cluster: &ClusterName,
        ids: &[TaskId],
    ) -> Result<Vec<Task>, MetadataError>;

    async fn describe_task_definition(
        &self,
        reference: &TaskDefinitionRef,
    ) -> Result<TaskDefinition, MetadataError>;
}
