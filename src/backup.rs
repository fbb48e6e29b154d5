//! 更新前バックアップ
//!
//! `<元ファイル名>_backup_<YYYYMMDD_HHMMSS>.xlsx` を同じフォルダに作成する。

use crate::error::{Result, UpdaterError};
use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};
use tracing::info;

/// バックアップファイルのパス
pub fn backup_path_for<Tz: TimeZone>(path: &Path, at: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_name = format!("{}_backup_{}.xlsx", stem, at.format("%Y%m%d_%H%M%S"));
    path.with_file_name(file_name)
}

/// ファイル全体をコピーしてバックアップを作成
pub fn create_backup(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(UpdaterError::FileNotFound(path.display().to_string()));
    }

    let backup_path = backup_path_for(path, &Local::now());
    std::fs::copy(path, &backup_path)?;

    info!(
        "Created backup: {}",
        backup_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    );
    Ok(backup_path)
}
