//! Domain model (ids, tasks, task definitions, timestamps, errors).

pub mod errors;
pub mod ids;
pub mod service;
pub mod task;
pub mod task_definition;
pub mod timestamp;

pub use self::errors::{ErrorKind, SelectionError};
pub use self::ids::{ClusterName, ServiceName, TaskDefinitionRef, TaskId, last_segment};
pub use self::service::ServiceSummary;
pub use self::task::{ContainerSummary, Task};
pub use self::task_definition::{ContainerDefinition, TaskDefinition};
pub use self::timestamp::{MIN_TIMESTAMP, RawTimestamp};
