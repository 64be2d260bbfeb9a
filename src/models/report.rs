//! # 运行结果数据模型
//!
//! 记录一次批量运行的统计计数与逐对失败明细。
//! 失败不会中断批次，全部收集在这里供汇总与日志使用。
//!
//! ## 依赖关系
//! - 被 `replicator/` 和 `commands/` 使用
//! - 无外部模块依赖

use std::path::PathBuf;

/// 单个 (source, target) 操作对的失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// 源条目路径
    pub source: PathBuf,

    /// 目标目录路径（非最终落点）
    pub target: PathBuf,

    /// 人类可读的失败原因，单行
    pub message: String,
}

impl FailureRecord {
    pub fn new(
        source: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        FailureRecord {
            source: source.into(),
            target: target.into(),
            message: message.into(),
        }
    }
}

/// 一次批量运行的结果
///
/// `attempted` 只统计实际尝试过的操作对：
/// 缺失的源不产生操作对，只计入 `sources_missing`。
#[derive(Debug, Default)]
pub struct RunReport {
    /// 实际尝试的操作对总数（存在的源 × 目标数）
    pub attempted: usize,

    /// 实际处理过的源条目数
    pub sources_processed: usize,

    /// 运行开始时已不存在、被跳过的源条目数
    pub sources_missing: usize,

    /// 逐对失败明细，按源顺序、源内按目标顺序
    pub failures: Vec<FailureRecord>,
}

impl RunReport {
    /// 成功的操作对数
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }

    /// 是否存在失败
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = RunReport::default();
        assert_eq!(report.attempted, 0);
        assert_eq!(report.succeeded(), 0);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_succeeded_is_attempted_minus_failures() {
        let mut report = RunReport {
            attempted: 6,
            sources_processed: 3,
            sources_missing: 1,
            failures: Vec::new(),
        };
        report
            .failures
            .push(FailureRecord::new("a.txt", "out1", "Destination already exists"));
        report
            .failures
            .push(FailureRecord::new("a.txt", "out2", "Destination already exists"));

        assert_eq!(report.succeeded(), 4);
        assert!(report.has_failures());
    }

    #[test]
    fn test_failure_record_fields() {
        let record = FailureRecord::new("src/dir", "out", "Failed to move 'out/dir': oops");
        assert_eq!(record.source, PathBuf::from("src/dir"));
        assert_eq!(record.target, PathBuf::from("out"));
        assert!(record.message.starts_with("Failed to move"));
    }
}
