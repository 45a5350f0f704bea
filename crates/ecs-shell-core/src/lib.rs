//! ecs-shell-core
//!
//! Resolves which ECS task and container an interactive shell should attach to.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, task_definition, timestamp, errors）
//! - **select**: タスク/コンテナ選択（純粋関数、I/O なし）
//! - **ports**: 抽象化レイヤー（EcsMetadata, InteractiveExec）
//! - **impls**: 実装（aws CLI 経由、インメモリ）
//! - **app**: アプリケーション層（ShellPipeline, ClusterOverview）

pub mod app;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;
pub mod select;

pub use error::ShellError;
