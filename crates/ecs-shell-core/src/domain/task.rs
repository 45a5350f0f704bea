use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{TaskDefinitionRef, TaskId};
use super::timestamp::{self, RawTimestamp};

/// A container as reported on a running task. Enough to identify it, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,
}

impl ContainerSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.last_status = Some(status.into());
        self
    }
}

/// A running task, freshly described for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub task_definition: TaskDefinitionRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<RawTimestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,

    #[serde(default)]
    pub containers: Vec<ContainerSummary>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, task_definition: TaskDefinitionRef) -> Self {
        Self {
            id: id.into(),
            task_definition,
            started_at: None,
            last_status: None,
            containers: Vec::new(),
        }
    }

    pub fn with_started_at(mut self, started_at: RawTimestamp) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn with_container(mut self, container: ContainerSummary) -> Self {
        self.containers.push(container);
        self
    }

    /// Normalized start time (see [`timestamp::normalize`]).
    pub fn started_at(&self) -> DateTime<Utc> {
        timestamp::normalize(self.started_at.as_ref())
    }

    pub fn container_names(&self) -> impl Iterator<Item = &str> {
        self.containers.iter().map(|c| c.name.as_str())
    }
}
