//! # MultiCopy - 批量复制/移动工具
//!
//! 把一组源文件/目录复制或移动到多个目标目录，
//! 逐对记录失败并在运行结束后汇总报告、写入错误日志。
//!
//! ## 子命令
//! - `process` - 执行批量复制/移动
//! - `plan`    - 预览将要执行的操作对，不触碰文件系统
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── models/     (数据模型)
//!   │     └── replicator/ (批量复制引擎)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod models;
mod replicator;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
