//! # 数据模型模块
//!
//! 定义一次批量运行的输入与输出数据模型。
//!
//! ## 依赖关系
//! - 被 `replicator/` 和 `commands/` 使用
//! - 子模块: report, request

pub mod report;
pub mod request;

pub use report::{FailureRecord, RunReport};
pub use request::{RunRequest, TransferMode};
