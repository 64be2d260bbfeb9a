//! # plan 命令实现
//!
//! 预览一次 process 运行将要尝试的 (source, target) 操作对，
//! 不做任何文件系统修改。
//!
//! ## 功能
//! - 与 process 相同的源展开逻辑
//! - 操作对表格（源、落点、操作）
//! - 算不出落点的源对标记为将失败
//! - 缺失源条目单独列出
//!
//! ## 依赖关系
//! - 使用 `cli/plan.rs` 定义的参数
//! - 使用 `replicator/collector.rs` 和 `replicator/transfer.rs`
//! - 使用 `utils/output.rs`

use crate::cli::plan::PlanArgs;
use crate::error::Result;
use crate::models::TransferMode;
use crate::replicator::{transfer, SourceCollector};
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 执行 plan 命令
pub fn execute(args: PlanArgs) -> Result<()> {
    let mode = TransferMode::from_move_flag(args.move_sources);
    output::print_header(&format!(
        "Plan: {} into {} target(s)",
        mode.progressive(),
        args.targets.len()
    ));

    let sources = SourceCollector::new(args.sources.clone())
        .with_patterns(&args.globs)
        .collect()?;

    if sources.is_empty() {
        output::print_warning("No source items to preview");
        return Ok(());
    }

    let (existing, missing): (Vec<&PathBuf>, Vec<&PathBuf>) =
        sources.iter().partition(|source| source.exists());

    print_pair_table(&existing, &args.targets, mode);

    for source in &missing {
        output::print_skip(&format!("{} (missing, will be skipped)", source.display()));
    }

    if mode == TransferMode::Move && args.targets.len() > 1 {
        output::print_warning(
            "Moving into multiple targets: each source reaches the first target only",
        );
    }

    output::print_success(&format!(
        "{} operation(s) ready from {} source item(s) and {} target(s)",
        existing.len() * args.targets.len(),
        existing.len(),
        args.targets.len()
    ));

    Ok(())
}

/// 打印操作对预览表格
fn print_pair_table(sources: &[&PathBuf], targets: &[PathBuf], mode: TransferMode) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct PairRow {
        #[tabled(rename = "Source item")]
        source: String,
        #[tabled(rename = "Destination")]
        destination: String,
        #[tabled(rename = "Operation")]
        operation: String,
    }

    let mut rows = Vec::new();
    for source in sources {
        for target in targets {
            let (destination, operation) = pair_cells(source, target, mode);
            rows.push(PairRow {
                source: source.display().to_string(),
                destination,
                operation,
            });
        }
    }

    if !rows.is_empty() {
        let table = Table::new(&rows);
        println!("{}", table);
    }
}

/// 单对预览的落点列与操作列
///
/// 算不出落点的源（无文件名）在真实运行中照样被尝试并记一条失败，
/// 预览里把这一对标记出来，而不是展示一个不会用到的落点。
fn pair_cells(source: &Path, target: &Path, mode: TransferMode) -> (String, String) {
    match transfer::destination_for(source, target) {
        Ok(destination) => (destination.display().to_string(), mode.to_string()),
        Err(_) => (
            "(no file name)".to_string(),
            format!("{} (will fail)", mode),
        ),
    }
}
