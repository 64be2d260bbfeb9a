//! # 错误日志写入工具
//!
//! 生成固定格式的错误日志块并以追加方式写入日志文件，
//! 历史运行的记录保留在同一文件里。
//!
//! ## 格式
//! - 每次运行一个连续块，块前以十个 `=` 分隔
//! - 块头时间戳为 `yyyy-MM-dd-HH-mm-ss`
//! - 每条失败以五个 `-` 引出，依次为源、目标、错误消息
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 使用
//! - 使用 `chrono` 生成时间戳

use crate::error::{MultiCopyError, Result};
use crate::models::FailureRecord;

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// 默认日志文件名
pub const DEFAULT_LOG_FILE: &str = "MultiCopy-ErrorLog.txt";

/// 块头时间戳格式（yyyy-MM-dd-HH-mm-ss）
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// 当前本地时间的日志时间戳
pub fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// 生成一次运行的完整日志块
///
/// Message 行末尾的引号是既定格式的一部分，保持原样。
pub fn run_block(timestamp: &str, failures: &[FailureRecord]) -> String {
    let mut block = String::new();

    block.push_str("\n\n");
    block.push_str(&"=".repeat(10));
    block.push('\n');
    block.push_str(&format!("MultiCopy error log for {}:\n\n", timestamp));

    for failure in failures {
        block.push_str(&"-".repeat(5));
        block.push('\n');
        block.push_str(&format!("Source item: {}\n", failure.source.display()));
        block.push_str(&format!("Destination: {}\n", failure.target.display()));
        block.push_str(&format!("Message: {}\"\n", failure.message));
    }

    block
}

/// 追加一个日志块到日志文件，文件不存在时创建
pub fn append(path: &Path, block: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| MultiCopyError::LogWriteError {
            path: path.display().to_string(),
            source: e,
        })?;

    file.write_all(block.as_bytes())
        .map_err(|e| MultiCopyError::LogWriteError {
            path: path.display().to_string(),
            source: e,
        })?;

    Ok(())
}
