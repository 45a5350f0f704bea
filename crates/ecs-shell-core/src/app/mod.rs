//! App - アプリケーション層
//!
//! ports を組み合わせてユースケースを実装します。
//!
//! # 主要コンポーネント
//! - **ShellPipeline**: タスク/コンテナを決定して対話セッションへ引き渡す
//! - **ClusterOverview**: クラスタ・サービスの一覧表示用データ

pub mod overview;
pub mod pipeline;

pub use self::overview::{ClusterOverview, OverviewRow};
pub use self::pipeline::{DEFAULT_SHELL, Resolution, RunOutcome, ShellPipeline, ShellRequest};
