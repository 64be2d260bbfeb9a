//! # 统一错误处理模块
//!
//! 定义 MultiCopy 的所有错误类型，使用 `thiserror` 派生。
//!
//! 传输类错误的 Display 文本会原样进入错误日志的 Message 字段，
//! 因此将底层 io 原因内联，保证单行自足。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// MultiCopy 统一错误类型
#[derive(Error, Debug)]
pub enum MultiCopyError {
    // ─────────────────────────────────────────────────────────────
    // 传输错误（逐对捕获，写入错误日志）
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to copy '{path}': {source}")]
    CopyError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move '{path}': {source}")]
    MoveError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    CreateDirError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Destination already exists: {path}")]
    DestinationExists { path: String },

    #[error("Source item has no file name: {path}")]
    InvalidSourceName { path: String },

    // ─────────────────────────────────────────────────────────────
    // 目录遍历错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to traverse '{path}': {source}")]
    WalkError {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 日志错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write error log: {path}")]
    LogWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MultiCopyError>;
