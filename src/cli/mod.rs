//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `process`: 执行批量复制/移动
//! - `plan`: 预览将要执行的操作对，不触碰文件系统
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: plan, process

pub mod plan;
pub mod process;

use clap::{Parser, Subcommand};

/// MultiCopy - 批量复制/移动工具
#[derive(Parser)]
#[command(name = "multicopy")]
#[command(version)]
#[command(about = "Copy or move source items into multiple target directories", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Copy or move every source item into every target directory
    Process(process::ProcessArgs),

    /// Preview the operation pairs a process run would attempt
    Plan(plan::PlanArgs),
}
