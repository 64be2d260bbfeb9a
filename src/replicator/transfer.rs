//! # 单对传输原语
//!
//! 把一个源条目复制或移动到一个目标目录下，落点统一为
//! `target_dir/<源文件名>`。复制与移动是两个同签名的原语，
//! 由 `select` 按模式选定一次，整次运行共用。
//!
//! ## 功能
//! - 文件移动（rename，跨设备时退回复制加删除）
//! - 目录移动（单次 rename，不做跨设备回退）
//! - 文件复制
//! - 目录树递归复制（walkdir 迭代遍历，不占用调用栈）
//! - 落点已存在时拒绝执行，不覆盖
//!
//! ## 依赖关系
//! - 被 `replicator/runner.rs` 和 `commands/plan.rs` 调用
//! - 使用 `walkdir` 遍历目录

use crate::error::{MultiCopyError, Result};
use crate::models::TransferMode;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 传输原语的统一签名：(源条目, 目标目录)
pub type TransferFn = fn(&Path, &Path) -> Result<()>;

/// 按模式选择传输原语，每次运行只选择一次
pub fn select(mode: TransferMode) -> TransferFn {
    match mode {
        TransferMode::Copy => copy_into,
        TransferMode::Move => move_into,
    }
}

/// 计算单对操作的最终落点：目标目录 + 源条目文件名
pub fn destination_for(source: &Path, target_dir: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .ok_or_else(|| MultiCopyError::InvalidSourceName {
            path: source.display().to_string(),
        })?;
    Ok(target_dir.join(name))
}

/// 复制一个源条目到目标目录下
///
/// 文件直接复制；目录走整树递归复制。源保持不变。
pub fn copy_into(source: &Path, target_dir: &Path) -> Result<()> {
    let destination = destination_for(source, target_dir)?;
    ensure_vacant(&destination)?;

    if source.is_dir() {
        copy_directory(source, &destination)
    } else {
        fs::copy(source, &destination)
            .map(|_| ())
            .map_err(|e| MultiCopyError::CopyError {
                path: destination.display().to_string(),
                source: e,
            })
    }
}

/// 移动一个源条目到目标目录下
///
/// 首选一次 rename。文件在跨设备时退回复制加删除；
/// 目录移动不做回退，跨设备由操作系统报错。
pub fn move_into(source: &Path, target_dir: &Path) -> Result<()> {
    let destination = destination_for(source, target_dir)?;
    ensure_vacant(&destination)?;

    match fs::rename(source, &destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices && source.is_file() => {
            copy_then_remove(source, &destination)
        }
        Err(e) => Err(MultiCopyError::MoveError {
            path: destination.display().to_string(),
            source: e,
        }),
    }
}

/// 跨设备文件移动的回退：先复制到落点，再删除源文件
///
/// 复制失败时清掉半成品落点，源文件保持原位。
fn copy_then_remove(source: &Path, destination: &Path) -> Result<()> {
    if let Err(e) = fs::copy(source, destination) {
        let _ = fs::remove_file(destination);
        return Err(MultiCopyError::MoveError {
            path: destination.display().to_string(),
            source: e,
        });
    }

    fs::remove_file(source).map_err(|e| MultiCopyError::MoveError {
        path: source.display().to_string(),
        source: e,
    })
}

/// 落点占用检查
///
/// `fs::copy` 和 `fs::rename` 在 Unix 上会静默覆盖已有文件，
/// 这里先行拒绝，保持不覆盖语义。
fn ensure_vacant(destination: &Path) -> Result<()> {
    if destination.exists() {
        return Err(MultiCopyError::DestinationExists {
            path: destination.display().to_string(),
        });
    }
    Ok(())
}

/// 递归复制整个目录树到 destination
///
/// walkdir 先产出父目录再产出其内容，目录总是先于文件被创建；
/// 缺失的中间目录（含 destination 自身）由 create_dir_all 补齐。
/// 中途出错即返回，已复制的部分保留，由调用方记录为该对的失败。
fn copy_directory(source: &Path, destination: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| MultiCopyError::WalkError {
            path: source.display().to_string(),
            source: e,
        })?;

        let relative = entry.path().strip_prefix(source).map_err(|_| {
            MultiCopyError::Other(format!(
                "Entry outside of source root: {}",
                entry.path().display()
            ))
        })?;
        let entry_destination = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&entry_destination).map_err(|e| {
                MultiCopyError::CreateDirError {
                    path: entry_destination.display().to_string(),
                    source: e,
                }
            })?;
        } else {
            fs::copy(entry.path(), &entry_destination).map(|_| ()).map_err(|e| {
                MultiCopyError::CopyError {
                    path: entry_destination.display().to_string(),
                    source: e,
                }
            })?;
        }
    }

    Ok(())
}
