//! # 批量执行器
//!
//! 按请求执行 N×M 扇出传输：每个存在的源条目对每个目标目录
//! 执行一次选定的传输原语，逐对收集失败，不中断批次。
//!
//! ## 功能
//! - 默认顺序执行，与列表顺序一致
//! - 可选基于 rayon 的跨源并行（源内部仍按目标顺序）
//! - 并行时落点先认领后执行，同名源不会互相覆盖
//! - 结果按源顺序合并，失败顺序与顺序执行完全一致
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 调用
//! - 使用 `replicator/transfer.rs` 执行单对操作
//! - 使用 `rayon` 进行并行计算

use crate::error::{MultiCopyError, Result};
use crate::models::{FailureRecord, RunReport, RunRequest};
use crate::replicator::transfer::{self, TransferFn};

use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 运行范围内已认领的落点集合
///
/// 落点占用检查和之后的 rename 不是一个原子动作：并行时两个
/// 同名源可能都先通过检查，后到的 rename 会静默覆盖先到的结果。
/// 落点在执行前先在此登记，重复认领的那一对直接记失败，
/// 不再触碰文件系统。
struct DestinationClaims {
    claimed: Mutex<HashSet<PathBuf>>,
}

impl DestinationClaims {
    fn new() -> Self {
        Self {
            claimed: Mutex::new(HashSet::new()),
        }
    }

    /// 认领一个落点；本次运行内已被认领过时返回 false
    fn claim(&self, destination: &Path) -> bool {
        self.claimed
            .lock()
            .unwrap()
            .insert(destination.to_path_buf())
    }
}

/// 单个源条目的处理结果
#[derive(Debug)]
enum SourceOutcome {
    /// 源在处理时已不存在，静默跳过
    Missing,
    /// 源被处理：对每个目标各尝试一次
    Processed {
        attempted: usize,
        failures: Vec<FailureRecord>,
    },
}

/// 批量执行器
pub struct Replicator {
    /// 并行作业数（1 = 顺序执行）
    jobs: usize,
}

impl Replicator {
    /// 创建新的批量执行器；jobs 为 0 时取 CPU 核数
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 执行一次批量运行
    ///
    /// 逐对失败全部收集进报告，本方法自身不返回错误。
    /// 移动模式下同一源的多个目标存在先后依赖（首个成功后源即消失），
    /// 因此并行只跨源分发，源内部保持目标顺序。
    pub fn run(&self, request: &RunRequest) -> RunReport {
        let op = transfer::select(request.mode);

        let outcomes: Vec<SourceOutcome> = if self.jobs > 1 && request.sources.len() > 1 {
            self.run_parallel(request, op)
        } else {
            request
                .sources
                .iter()
                .map(|source| process_source(source, &request.targets, op))
                .collect()
        };

        merge_outcomes(outcomes)
    }

    /// 跨源并行执行；线程池创建失败时退回顺序执行
    ///
    /// 并行下各源的完成次序不定，落点按认领先后归属，
    /// 落后认领的对记"落点已存在"失败。
    fn run_parallel(&self, request: &RunRequest, op: TransferFn) -> Vec<SourceOutcome> {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
        {
            Ok(pool) => pool,
            Err(_) => {
                return request
                    .sources
                    .iter()
                    .map(|source| process_source(source, &request.targets, op))
                    .collect();
            }
        };

        let claims = DestinationClaims::new();
        pool.install(|| {
            request
                .sources
                .par_iter()
                .map(|source| process_source_claimed(source, &request.targets, op, &claims))
                .collect()
        })
    }
}

/// 处理单个源条目：对每个目标依次执行传输原语
fn process_source(source: &Path, targets: &[PathBuf], op: TransferFn) -> SourceOutcome {
    // 存在性检查在处理时点做；缺失源不产生操作对
    if !source.exists() {
        return SourceOutcome::Missing;
    }

    let mut failures = Vec::new();
    for target in targets {
        if let Err(e) = op(source, target) {
            failures.push(FailureRecord::new(source, target, e.to_string()));
        }
    }

    SourceOutcome::Processed {
        attempted: targets.len(),
        failures,
    }
}

/// 并行下处理单个源条目：每个落点先认领再执行
fn process_source_claimed(
    source: &Path,
    targets: &[PathBuf],
    op: TransferFn,
    claims: &DestinationClaims,
) -> SourceOutcome {
    if !source.exists() {
        return SourceOutcome::Missing;
    }

    let mut failures = Vec::new();
    for target in targets {
        if let Err(e) = claim_and_transfer(source, target, op, claims) {
            failures.push(FailureRecord::new(source, target, e.to_string()));
        }
    }

    SourceOutcome::Processed {
        attempted: targets.len(),
        failures,
    }
}

/// 认领落点后再执行传输原语
///
/// 无文件名的源算不出落点，认领不了，由原语自行报错。
fn claim_and_transfer(
    source: &Path,
    target: &Path,
    op: TransferFn,
    claims: &DestinationClaims,
) -> Result<()> {
    if let Ok(destination) = transfer::destination_for(source, target) {
        if !claims.claim(&destination) {
            return Err(MultiCopyError::DestinationExists {
                path: destination.display().to_string(),
            });
        }
    }
    op(source, target)
}

/// 按源顺序合并各源的处理结果
fn merge_outcomes(outcomes: Vec<SourceOutcome>) -> RunReport {
    let mut report = RunReport::default();

    for outcome in outcomes {
        match outcome {
            SourceOutcome::Missing => report.sources_missing += 1,
            SourceOutcome::Processed {
                attempted,
                failures,
            } => {
                report.sources_processed += 1;
                report.attempted += attempted;
                report.failures.extend(failures);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransferMode;
    use std::ffi::OsString;
    use std::fs;
    use tempfile::tempdir;

    /// 4 个源文件 × 2 个目标目录，其中预置两处冲突制造确定的失败
    fn build_fanout_fixture(root: &Path) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let mut sources = Vec::new();
        for name in ["s0.txt", "s1.txt", "s2.txt", "s3.txt"] {
            let path = root.join(name);
            fs::write(&path, name).unwrap();
            sources.push(path);
        }

        let mut targets = Vec::new();
        for name in ["out1", "out2"] {
            let path = root.join(name);
            fs::create_dir(&path).unwrap();
            targets.push(path);
        }

        fs::write(root.join("out1").join("s1.txt"), "old").unwrap();
        fs::write(root.join("out2").join("s3.txt"), "old").unwrap();

        (sources, targets)
    }

    fn failure_key(record: &FailureRecord) -> (OsString, OsString) {
        (
            record.source.file_name().unwrap().to_os_string(),
            record.target.file_name().unwrap().to_os_string(),
        )
    }

    #[test]
    fn test_attempted_is_existing_sources_times_targets() {
        let root = tempdir().unwrap();
        let a = root.path().join("a.txt");
        let b = root.path().join("b.txt");
        fs::write(&a, "aa").unwrap();
        fs::write(&b, "bb").unwrap();
        let missing = root.path().join("missing.txt");
        let out1 = root.path().join("out1");
        let out2 = root.path().join("out2");
        fs::create_dir(&out1).unwrap();
        fs::create_dir(&out2).unwrap();

        let request = RunRequest::new(TransferMode::Copy)
            .with_sources(vec![a, missing, b])
            .with_targets(vec![out1.clone(), out2.clone()]);
        let report = Replicator::new(1).run(&request);

        assert_eq!(report.attempted, 4);
        assert_eq!(report.sources_processed, 2);
        assert_eq!(report.sources_missing, 1);
        assert_eq!(report.succeeded(), 4);
        assert!(report.failures.is_empty());
        assert!(out1.join("a.txt").exists());
        assert!(out2.join("a.txt").exists());
        assert!(out1.join("b.txt").exists());
        assert!(out2.join("b.txt").exists());
    }

    #[test]
    fn test_missing_source_never_reaches_failures() {
        let root = tempdir().unwrap();
        let real = root.path().join("real.txt");
        fs::write(&real, "x").unwrap();
        let missing = root.path().join("gone.txt");
        let out = root.path().join("out");
        fs::create_dir(&out).unwrap();

        let request = RunRequest::new(TransferMode::Copy)
            .with_sources(vec![missing.clone(), real])
            .with_targets(vec![out]);
        let report = Replicator::new(1).run(&request);

        assert_eq!(report.attempted, 1);
        assert_eq!(report.sources_missing, 1);
        assert!(report.failures.iter().all(|f| f.source != missing));
    }

    #[test]
    fn test_copy_fanout_keeps_source_and_content() {
        let root = tempdir().unwrap();
        let a = root.path().join("a.txt");
        fs::write(&a, "abc").unwrap();
        let missing = root.path().join("missing.txt");
        let out1 = root.path().join("out1");
        let out2 = root.path().join("out2");
        fs::create_dir(&out1).unwrap();
        fs::create_dir(&out2).unwrap();

        let request = RunRequest::new(TransferMode::Copy)
            .with_sources(vec![a.clone(), missing])
            .with_targets(vec![out1.clone(), out2.clone()]);
        let report = Replicator::new(1).run(&request);

        assert_eq!(report.attempted, 2);
        assert!(report.failures.is_empty());
        assert_eq!(fs::read_to_string(out1.join("a.txt")).unwrap(), "abc");
        assert_eq!(fs::read_to_string(out2.join("a.txt")).unwrap(), "abc");
        assert!(a.exists());
    }

    #[test]
    fn test_second_copy_fails_without_corruption() {
        let root = tempdir().unwrap();
        let a = root.path().join("a.txt");
        fs::write(&a, "abc").unwrap();
        let out = root.path().join("out");
        fs::create_dir(&out).unwrap();

        let request = RunRequest::new(TransferMode::Copy)
            .with_sources(vec![a])
            .with_targets(vec![out.clone()]);

        let first = Replicator::new(1).run(&request);
        assert!(first.failures.is_empty());

        let second = Replicator::new(1).run(&request);
        assert_eq!(second.attempted, 1);
        assert_eq!(second.failures.len(), 1);
        assert!(second.failures[0].message.contains("already exists"));
        assert_eq!(fs::read_to_string(out.join("a.txt")).unwrap(), "abc");
    }

    #[test]
    fn test_partial_failure_isolation() {
        let root = tempdir().unwrap();
        let a = root.path().join("a.txt");
        fs::write(&a, "abc").unwrap();
        // 第一个"目标"是常规文件，落点路径必然报错
        let bogus = root.path().join("not_a_dir");
        fs::write(&bogus, "").unwrap();
        let open = root.path().join("open");
        fs::create_dir(&open).unwrap();

        let request = RunRequest::new(TransferMode::Copy)
            .with_sources(vec![a])
            .with_targets(vec![bogus.clone(), open.clone()]);
        let report = Replicator::new(1).run(&request);

        assert_eq!(report.attempted, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].target, bogus);
        assert_eq!(fs::read_to_string(open.join("a.txt")).unwrap(), "abc");
    }

    #[test]
    fn test_move_reaches_first_target_only() {
        let root = tempdir().unwrap();
        let a = root.path().join("a.txt");
        fs::write(&a, "abc").unwrap();
        let out1 = root.path().join("out1");
        let out2 = root.path().join("out2");
        fs::create_dir(&out1).unwrap();
        fs::create_dir(&out2).unwrap();

        let request = RunRequest::new(TransferMode::Move)
            .with_sources(vec![a.clone()])
            .with_targets(vec![out1.clone(), out2.clone()]);
        let report = Replicator::new(1).run(&request);

        // 首个目标拿到条目，其后的目标各记一条失败
        assert_eq!(report.attempted, 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].target, out2);
        assert!(!a.exists());
        assert_eq!(fs::read_to_string(out1.join("a.txt")).unwrap(), "abc");
        assert!(!out2.join("a.txt").exists());
    }

    #[test]
    fn test_move_directory_removes_source() {
        let root = tempdir().unwrap();
        let dir = root.path().join("pkg");
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("sub/f.txt"), "x").unwrap();
        let out = root.path().join("out");
        fs::create_dir(&out).unwrap();

        let request = RunRequest::new(TransferMode::Move)
            .with_sources(vec![dir.clone()])
            .with_targets(vec![out.clone()]);
        let report = Replicator::new(1).run(&request);

        assert!(report.failures.is_empty());
        assert!(!dir.exists());
        assert_eq!(
            fs::read_to_string(out.join("pkg/sub/f.txt")).unwrap(),
            "x"
        );
    }

    #[test]
    fn test_empty_request_reports_zeros() {
        let request = RunRequest::new(TransferMode::Copy);
        let report = Replicator::new(1).run(&request);

        assert_eq!(report.attempted, 0);
        assert_eq!(report.sources_processed, 0);
        assert_eq!(report.sources_missing, 0);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_parallel_report_matches_sequential() {
        let seq_root = tempdir().unwrap();
        let (seq_sources, seq_targets) = build_fanout_fixture(seq_root.path());
        let par_root = tempdir().unwrap();
        let (par_sources, par_targets) = build_fanout_fixture(par_root.path());

        let seq_report = Replicator::new(1).run(
            &RunRequest::new(TransferMode::Copy)
                .with_sources(seq_sources)
                .with_targets(seq_targets),
        );
        let par_report = Replicator::new(4).run(
            &RunRequest::new(TransferMode::Copy)
                .with_sources(par_sources)
                .with_targets(par_targets),
        );

        assert_eq!(seq_report.attempted, 8);
        assert_eq!(par_report.attempted, seq_report.attempted);
        assert_eq!(par_report.sources_processed, seq_report.sources_processed);
        assert_eq!(par_report.succeeded(), seq_report.succeeded());

        // 合并按源顺序，失败序列与顺序执行一致
        let seq_keys: Vec<_> = seq_report.failures.iter().map(failure_key).collect();
        let par_keys: Vec<_> = par_report.failures.iter().map(failure_key).collect();
        assert_eq!(seq_keys, par_keys);
    }

    #[test]
    fn test_destination_claims_are_first_come_only() {
        let claims = DestinationClaims::new();

        assert!(claims.claim(Path::new("/out/x.txt")));
        assert!(!claims.claim(Path::new("/out/x.txt")));
        assert!(claims.claim(Path::new("/out/y.txt")));
    }

    #[test]
    fn test_claimed_destination_fails_before_transfer() {
        let root = tempdir().unwrap();
        let a = root.path().join("a").join("x.txt");
        let b = root.path().join("b").join("x.txt");
        fs::create_dir(a.parent().unwrap()).unwrap();
        fs::create_dir(b.parent().unwrap()).unwrap();
        fs::write(&a, "from-a").unwrap();
        fs::write(&b, "from-b").unwrap();
        let out = root.path().join("out");
        fs::create_dir(&out).unwrap();

        let op = transfer::select(TransferMode::Move);
        let claims = DestinationClaims::new();

        claim_and_transfer(&a, &out, op, &claims).unwrap();
        let err = claim_and_transfer(&b, &out, op, &claims).unwrap_err();

        assert!(matches!(err, MultiCopyError::DestinationExists { .. }));
        // 落后认领的一对没有触碰文件系统
        assert_eq!(fs::read_to_string(out.join("x.txt")).unwrap(), "from-a");
        assert_eq!(fs::read_to_string(&b).unwrap(), "from-b");
    }

    #[test]
    fn test_parallel_same_name_sources_do_not_overwrite() {
        // 反复运行以覆盖不同的线程交错
        for _ in 0..200 {
            let root = tempdir().unwrap();
            let a = root.path().join("a").join("x.txt");
            let b = root.path().join("b").join("x.txt");
            fs::create_dir(a.parent().unwrap()).unwrap();
            fs::create_dir(b.parent().unwrap()).unwrap();
            fs::write(&a, "from-a").unwrap();
            fs::write(&b, "from-b").unwrap();
            let out = root.path().join("out");
            fs::create_dir(&out).unwrap();

            let request = RunRequest::new(TransferMode::Move)
                .with_sources(vec![a.clone(), b.clone()])
                .with_targets(vec![out.clone()]);
            let report = Replicator::new(2).run(&request);

            // 恰好一对成功、一对失败，两份内容都还在
            assert_eq!(report.attempted, 2);
            assert_eq!(report.succeeded(), 1);
            assert_eq!(report.failures.len(), 1);
            assert!(report.failures[0].message.contains("already exists"));

            let loser = report.failures[0].source.clone();
            let (winner, winner_content, loser_content) = if loser == a {
                (b.clone(), "from-b", "from-a")
            } else {
                (a.clone(), "from-a", "from-b")
            };
            assert!(!winner.exists());
            assert_eq!(
                fs::read_to_string(out.join("x.txt")).unwrap(),
                winner_content
            );
            assert_eq!(fs::read_to_string(&loser).unwrap(), loser_content);
        }
    }

    #[test]
    fn test_jobs_zero_resolves_to_cpu_count() {
        let replicator = Replicator::new(0);
        assert!(replicator.jobs >= 1);
    }
}
