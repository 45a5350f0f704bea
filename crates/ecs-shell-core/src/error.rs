use thiserror::Error;

use crate::domain::SelectionError;
use crate::ports::{ExecError, MetadataError};

/// Everything that can end a shell invocation early.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Exec(#[from] ExecError),
}
