//! ClusterOverview - クラスタ/サービス一覧
//!
//! クラスタやサービスが指定されなかったときに表示する一覧を組み立てます。
//! 一部の API 呼び出しが失敗しても、その行にエラーを書いて続行します。

use crate::domain::ClusterName;
use crate::ports::{EcsMetadata, MetadataError};

/// One line of the overview table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewRow {
    pub cluster: String,
    pub service: String,
    pub running_tasks: String,
    pub task_definition: String,
}

impl OverviewRow {
    pub const HEADERS: [&'static str; 4] =
        ["Cluster Name", "Service Name", "Running Tasks", "Task Definition"];

    pub fn cells(&self) -> [&str; 4] {
        [
            &self.cluster,
            &self.service,
            &self.running_tasks,
            &self.task_definition,
        ]
    }
}

pub struct ClusterOverview<'a, M> {
    metadata: &'a M,
}

impl<'a, M: EcsMetadata> ClusterOverview<'a, M> {
    pub fn new(metadata: &'a M) -> Self {
        Self { metadata }
    }

    /// Rows for every service of every cluster, both sorted by name.
    ///
    /// Only listing the clusters themselves can fail; later failures become rows.
    pub async fn rows(&self) -> Result<Vec<OverviewRow>, MetadataError> {
        let mut clusters = self.metadata.list_clusters().await?;
        clusters.sort();

        let mut rows = Vec::new();
        for cluster in &clusters {
            self.cluster_rows(cluster, &mut rows).await;
        }
        Ok(rows)
    }

    async fn cluster_rows(&self, cluster: &ClusterName, rows: &mut Vec<OverviewRow>) {
        let mut services = match self.metadata.list_services(cluster).await {
            Ok(services) => services,
            Err(e) => {
                tracing::warn!(%cluster, error = %e, "failed to list services");
                rows.push(OverviewRow {
                    cluster: cluster.to_string(),
                    service: format!("Error listing services: {e}"),
                    running_tasks: String::new(),
                    task_definition: String::new(),
                });
                return;
            }
        };
        services.sort();

        for service in &services {
            let row = match self.metadata.describe_service(cluster, service).await {
                Ok(summary) => OverviewRow {
                    cluster: cluster.to_string(),
                    service: service.to_string(),
                    running_tasks: summary.running_count.to_string(),
                    task_definition: summary.task_definition.family_revision().to_string(),
                },
                Err(e) => {
                    tracing::warn!(%cluster, %service, error = %e, "failed to describe service");
                    OverviewRow {
                        cluster: cluster.to_string(),
                        service: service.to_string(),
                        running_tasks: format!("Error: {e}"),
                        task_definition: String::new(),
                    }
                }
            };
            rows.push(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ServiceName, ServiceSummary, TaskDefinitionRef};
    use crate::impls::InMemoryMetadata;

    fn summary(name: &str, family_revision: &str, running: u32) -> ServiceSummary {
        ServiceSummary {
            name: ServiceName::new(name),
            task_definition: TaskDefinitionRef::new(format!(
                "arn:aws:ecs:us-east-1:123456789012:task-definition/{family_revision}"
            )),
            desired_count: running,
            running_count: running,
        }
    }

    #[tokio::test]
    async fn rows_are_sorted_by_cluster_then_service() {
        let meta = InMemoryMetadata::new()
            .with_service("staging", summary("web", "web:2", 1))
            .with_service("prod", summary("worker", "worker:8", 2))
            .with_service("prod", summary("api", "api:7", 3));

        let rows = ClusterOverview::new(&meta).rows().await.unwrap();
        let cells: Vec<[&str; 4]> = rows.iter().map(|r| r.cells()).collect();
        assert_eq!(
            cells,
            vec![
                ["prod", "api", "3", "api:7"],
                ["prod", "worker", "2", "worker:8"],
                ["staging", "web", "1", "web:2"],
            ]
        );
    }

    #[tokio::test]
    async fn failures_become_rows() {
        let meta = InMemoryMetadata::new()
            .with_broken_cluster("legacy")
            .with_service("prod", summary("api", "api:7", 3))
            // listed (has a task) but never described
            .with_task(
                "prod",
                "ghost",
                crate::domain::Task::new("t", TaskDefinitionRef::new("ghost:1")),
            );

        let rows = ClusterOverview::new(&meta).rows().await.unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].cluster, "legacy");
        assert!(rows[0].service.starts_with("Error listing services: "));

        assert_eq!(rows[2].service, "ghost");
        assert_eq!(
            rows[2].running_tasks,
            "Error: Service 'ghost' not found in cluster 'prod'"
        );
        assert!(rows[2].task_definition.is_empty());
    }

    #[tokio::test]
    async fn no_clusters_means_no_rows() {
        let meta = InMemoryMetadata::new();
        assert!(ClusterOverview::new(&meta).rows().await.unwrap().is_empty());
    }
}
