//! Errors - 選択処理のエラー型と分類
//!
//! どのエラーもその呼び出しにとって終端（リトライしない）。

use thiserror::Error;

/// ErrorKind は選択失敗の分類
///
/// - NotFound: 指定された task id / container 名が存在しない（候補 0 件も含む）
/// - Ambiguous: 自動では 1 つに絞れない
///
/// サービスにタスクが無いこと自体はエラーではなく、`app::Resolution::NoTasks` で返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Ambiguous,
}

/// Why a task or container could not be resolved.
///
/// `available` lists are sorted so the message is stable and actionable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// `select_task` was handed an empty list.
    #[error("No running tasks found")]
    NoTasks,

    #[error("Task '{requested}' not found. Available tasks: {}", available.join(", "))]
    TaskNotFound {
        requested: String,
        available: Vec<String>,
    },

    #[error("Container '{requested}' not found in task. Available containers: {}", available.join(", "))]
    ContainerNotFound {
        requested: String,
        available: Vec<String>,
    },

    #[error("No containers found in task")]
    NoContainers,

    #[error(
        "Container name must be specified with -c because it cannot be automatically determined. Available containers: {}",
        available.join(", ")
    )]
    AmbiguousContainer { available: Vec<String> },
}

impl SelectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoTasks
            | Self::TaskNotFound { .. }
            | Self::ContainerNotFound { .. }
            | Self::NoContainers => ErrorKind::NotFound,
            Self::AmbiguousContainer { .. } => ErrorKind::Ambiguous,
        }
    }

    /// Valid alternatives the user could pass instead.
    pub fn alternatives(&self) -> &[String] {
        match self {
            Self::TaskNotFound { available, .. }
            | Self::ContainerNotFound { available, .. }
            | Self::AmbiguousContainer { available } => available,
            Self::NoTasks | Self::NoContainers => &[],
        }
    }
}
