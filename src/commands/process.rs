//! # process 命令实现
//!
//! 组装运行请求，执行批量复制/移动，打印汇总，
//! 并在有失败时把日志块追加到错误日志文件。
//!
//! ## 功能
//! - 字面路径 + glob 模式展开为源列表
//! - 运行期间显示 spinner（整体活动指示）
//! - 失败明细表格，最多 10 行
//! - 逐对失败不影响进程退出码，只进汇总和日志
//!
//! ## 依赖关系
//! - 使用 `cli/process.rs` 定义的参数
//! - 使用 `replicator/`, `models/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/error_log.rs`

use crate::cli::process::ProcessArgs;
use crate::error::Result;
use crate::models::{FailureRecord, RunReport, RunRequest, TransferMode};
use crate::replicator::{Replicator, SourceCollector};
use crate::utils::{error_log, output, progress};

/// 执行 process 命令
pub fn execute(args: ProcessArgs) -> Result<()> {
    let mode = TransferMode::from_move_flag(args.move_sources);
    output::print_header(&format!(
        "{} into {} target(s)",
        mode.progressive(),
        args.targets.len()
    ));

    // 收集源条目
    let sources = SourceCollector::new(args.sources.clone())
        .with_patterns(&args.globs)
        .collect()?;

    if sources.is_empty() {
        output::print_warning("No source items to process");
        return Ok(());
    }

    let request = RunRequest::new(mode)
        .with_sources(sources)
        .with_targets(args.targets.clone());

    // 缺失源在执行时才被跳过，这里给的是上限
    output::print_info(&format!(
        "Processing {} source item(s) into {} target(s), up to {} operation(s)",
        request.sources.len(),
        request.targets.len(),
        request.pair_count()
    ));

    let spinner = progress::create_spinner(&format!("{}...", mode.progressive()));
    let report = Replicator::new(args.jobs).run(&request);
    spinner.finish_and_clear();

    print_summary(&report);

    // 仅在存在失败时写日志
    if report.has_failures() {
        let block = error_log::run_block(&error_log::current_timestamp(), &report.failures);
        error_log::append(&args.log, &block)?;
        output::print_info(&format!("See '{}' for details", args.log.display()));
    }

    Ok(())
}

/// 打印运行汇总
fn print_summary(report: &RunReport) {
    output::print_separator();

    if report.attempted > 0 {
        output::print_info(&format!(
            "{} of {} operation(s) succeeded",
            report.succeeded(),
            report.attempted
        ));
    }
    if report.sources_missing > 0 {
        output::print_skip(&format!(
            "{} missing source item(s) skipped",
            report.sources_missing
        ));
    }

    if report.has_failures() {
        output::print_error(&format!(
            "There were {} error(s) when processing",
            report.failures.len()
        ));
        print_failure_table(&report.failures, 10);
    } else {
        output::print_done(&format!(
            "Processed {} source item(s) successfully",
            report.sources_processed
        ));
    }
}

/// 打印失败明细表格，最多 count 行
fn print_failure_table(failures: &[FailureRecord], count: usize) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct FailureRow {
        #[tabled(rename = "Source item")]
        source: String,
        #[tabled(rename = "Destination")]
        destination: String,
        #[tabled(rename = "Message")]
        message: String,
    }

    let rows: Vec<FailureRow> = failures
        .iter()
        .take(count)
        .map(|f| FailureRow {
            source: f.source.display().to_string(),
            destination: f.target.display().to_string(),
            message: f.message.clone(),
        })
        .collect();

    if !rows.is_empty() {
        let table = Table::new(&rows);
        println!("{}", table);
    }
    if failures.len() > count {
        output::print_warning(&format!("  ... and {} more", failures.len() - count));
    }
}
