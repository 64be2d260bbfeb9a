//! # plan 子命令 CLI 定义
//!
//! 预览一次 process 运行将要尝试的操作对
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plan.rs`

use clap::Args;
use std::path::PathBuf;

/// plan 子命令参数
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Source files or directories to preview
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<PathBuf>,

    /// Target directory receiving the sources (repeatable)
    #[arg(short, long = "target", value_name = "DIR", required = true)]
    pub targets: Vec<PathBuf>,

    /// Preview a move run instead of a copy run
    #[arg(short = 'm', long = "move", default_value_t = false)]
    pub move_sources: bool,

    /// Glob pattern adding matching paths as sources (repeatable)
    #[arg(short, long = "glob", value_name = "PATTERN")]
    pub globs: Vec<String>,
}
