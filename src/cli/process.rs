//! # process 子命令 CLI 定义
//!
//! 把每个源条目复制/移动到每个目标目录
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/process.rs`

use crate::utils::error_log;
use clap::Args;
use std::path::PathBuf;

/// process 子命令参数
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Source files or directories to process
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<PathBuf>,

    /// Target directory receiving the sources (repeatable)
    #[arg(short, long = "target", value_name = "DIR", required = true)]
    pub targets: Vec<PathBuf>,

    /// Move the sources instead of copying them
    #[arg(short = 'm', long = "move", default_value_t = false)]
    pub move_sources: bool,

    /// Glob pattern adding matching paths as sources (repeatable)
    #[arg(short, long = "glob", value_name = "PATTERN")]
    pub globs: Vec<String>,

    /// Number of parallel jobs across sources (0 = auto)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Error log file, appended to when failures occur
    #[arg(
        long,
        value_name = "FILE",
        env = "MULTICOPY_LOG",
        default_value = error_log::DEFAULT_LOG_FILE
    )]
    pub log: PathBuf,
}
