use serde::{Deserialize, Serialize};

use super::ids::{ServiceName, TaskDefinitionRef};

/// What the cluster overview needs to know about a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub name: ServiceName,
    pub task_definition: TaskDefinitionRef,
    pub desired_count: u32,
    pub running_count: u32,
}
