//! # 源条目收集器
//!
//! 将命令行给出的字面路径与 glob 模式展开为有序的源条目列表。
//!
//! ## 功能
//! - 字面路径保持给出顺序
//! - glob 模式展开，匹配结果按字母序追加
//! - 不去重，重复条目原样保留
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 和 `commands/plan.rs` 调用
//! - 使用 `glob` 展开模式

use crate::error::{MultiCopyError, Result};

use std::path::PathBuf;

/// 源条目收集器
pub struct SourceCollector {
    /// 字面路径
    literals: Vec<PathBuf>,
    /// glob 模式列表
    patterns: Vec<String>,
}

impl SourceCollector {
    /// 创建新的源条目收集器
    pub fn new(literals: Vec<PathBuf>) -> Self {
        Self {
            literals,
            patterns: Vec::new(),
        }
    }

    /// 设置 glob 模式列表
    pub fn with_patterns(mut self, patterns: &[String]) -> Self {
        self.patterns = patterns.to_vec();
        self
    }

    /// 展开为有序源列表
    ///
    /// 字面路径在前，随后逐个追加每个模式的匹配结果。
    /// 模式无匹配不是错误；模式本身非法才报错。
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let mut sources = self.literals.clone();

        for pattern in &self.patterns {
            let matches = glob::glob(pattern).map_err(|e| {
                MultiCopyError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
            })?;
            sources.extend(matches.filter_map(|m| m.ok()));
        }

        Ok(sources)
    }
}
