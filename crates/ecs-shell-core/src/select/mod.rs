//! Select - タスクとコンテナの決定ロジック
//!
//! 取得済みのメタデータだけを入力とする純粋関数。I/O もログも行わない。
//!
//! # 流れ
//! 1. [`select_task`]: 候補タスクから 1 件を選ぶ（指定 ID か、最も新しく起動したもの）
//! 2. [`select_container`]: そのタスクから 1 コンテナを選ぶ（指定名、単一、essential の順）

pub mod container;
pub mod task;

pub use self::container::select_container;
pub use self::task::select_task;

use crate::domain::TaskId;

/// The resolved `(task, container)` pair handed to the exec side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub task_id: TaskId,
    pub container: String,
}
