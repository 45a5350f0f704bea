//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **AwsCliMetadata** / **AwsCliExec**: `aws` CLI を起動する本番用実装
//! - **InMemoryMetadata** / **RecordingExec**: テスト・開発用

pub mod aws_cli;
pub mod aws_exec;
pub mod inmem;

pub use self::aws_cli::{AwsCliConfig, AwsCliMetadata};
pub use self::aws_exec::AwsCliExec;
pub use self::inmem::{InMemoryMetadata, RecordingExec};
