//! InteractiveExec port - コンテナ内での対話コマンド実行

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ClusterName, TaskId};

/// Everything needed to open a session: where, and what to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    pub cluster: ClusterName,
    pub task_id: TaskId,
    pub container: String,
    pub command: String,
}

/// How a session ended. A user interrupt is a normal ending, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    Completed,
    Interrupted,
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command exited with {status}")]
    Failed { status: String },

    #[error("failed to listen for interrupt: {0}")]
    Signal(#[source] std::io::Error),
}

/// Opens an interactive session. May block for as long as the user stays in it.
#[async_trait]
pub trait InteractiveExec: Send + Sync {
    async fn exec(&self, request: &ExecRequest) -> Result<ExecStatus, ExecError>;
}
