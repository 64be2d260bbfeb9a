//! # 批量复制引擎
//!
//! 把每个源条目复制或移动到每个目标目录（N×M 扇出），
//! 逐对捕获失败，不中断整个批次。
//!
//! ## 功能
//! - 源条目收集（字面路径 + glob 模式）
//! - 顺序执行或跨源并行执行
//! - 失败收集与按源顺序合并
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `walkdir` 遍历目录

pub mod collector;
pub mod runner;
pub mod transfer;

pub use collector::SourceCollector;
pub use runner::Replicator;
