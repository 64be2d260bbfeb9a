//! # 运行请求数据模型
//!
//! 描述一次批量运行的全部输入：源条目列表、目标目录列表与传输模式。
//! 请求在运行期间不可变，执行器只读取它。
//!
//! ## 依赖关系
//! - 被 `replicator/` 和 `commands/` 使用
//! - 无外部模块依赖

use std::fmt;
use std::path::PathBuf;

/// 传输模式：整次运行统一为复制或移动
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// 复制源条目，源保持不变
    Copy,
    /// 移动源条目，成功后源消失
    Move,
}

impl TransferMode {
    /// 从 `--move` 标志构造模式
    pub fn from_move_flag(move_sources: bool) -> Self {
        if move_sources {
            TransferMode::Move
        } else {
            TransferMode::Copy
        }
    }

    /// 进行时动词，用于标题与状态行
    pub fn progressive(&self) -> &'static str {
        match self {
            TransferMode::Copy => "Copying",
            TransferMode::Move => "Moving",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMode::Copy => write!(f, "copy"),
            TransferMode::Move => write!(f, "move"),
        }
    }
}

/// 一次批量运行的输入
///
/// 源与目标均为有序列表，顺序决定执行顺序；
/// 列表允许重复条目，重复会被原样执行。
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// 源条目（文件或目录）
    pub sources: Vec<PathBuf>,

    /// 目标目录
    pub targets: Vec<PathBuf>,

    /// 传输模式
    pub mode: TransferMode,
}

impl RunRequest {
    pub fn new(mode: TransferMode) -> Self {
        RunRequest {
            sources: Vec::new(),
            targets: Vec::new(),
            mode,
        }
    }

    /// 设置源条目列表
    pub fn with_sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.sources = sources;
        self
    }

    /// 设置目标目录列表
    pub fn with_targets(mut self, targets: Vec<PathBuf>) -> Self {
        self.targets = targets;
        self
    }

    /// 预期操作对总数（每个源 × 每个目标）
    pub fn pair_count(&self) -> usize {
        self.sources.len() * self.targets.len()
    }
}
