//! Ports - 外部システムへの抽象化レイヤー
//!
//! ECS コントロールプレーン（メタデータ取得）と対話セッション（execute-command）
//! をそれぞれ trait として切り出し、選択ロジックとパイプラインを実装から独立させます。
//!
//! # 実装
//! - `impls::AwsCliMetadata` / `impls::AwsCliExec`: `aws` CLI 経由（本番用）
//! - `impls::InMemoryMetadata` / `impls::RecordingExec`: テスト用

pub mod exec;
pub mod metadata;

pub use self::exec::{ExecError, ExecRequest, ExecStatus, InteractiveExec};
pub use self::metadata::{EcsMetadata, MetadataError};
