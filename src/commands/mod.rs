//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `models/`, `replicator/`, `utils/`
//! - 子模块: plan, process

pub mod plan;
pub mod process;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Process(args) => process::execute(args),
        Commands::Plan(args) => plan::execute(args),
    }
}
