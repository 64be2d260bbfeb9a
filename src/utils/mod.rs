//! # 工具函数模块
//!
//! 提供美化输出、进度指示、错误日志写入等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: error_log, output, progress

pub mod error_log;
pub mod output;
pub mod progress;
