//! 構造キャッシュの統合テスト
//!
//! 実ファイルに対するキャッシュの再利用と破棄を検証

mod common;

use excel_updater::cache::{StructureCache, WorkbookSource};
use excel_updater::common::SheetLayout;
use excel_updater::config::Config;
use excel_updater::updater::Updater;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn source() -> WorkbookSource {
    WorkbookSource::new("Master Sheet", SheetLayout::default())
}

/// 実ファイルから推定した構造
#[test]
fn test_detects_fixture_structure() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("Master.xlsx");
    common::write_master(&path, "Master Sheet", &[]);

    let mut cache = StructureCache::new(source(), Duration::from_secs(300));
    let structure = cache.get_structure(&path).expect("構造推定失敗");

    assert_eq!(structure.trade_column, 3);
    assert_eq!(structure.trade_start_row, 5);
    let keys: Vec<&String> = structure.header_groups.keys().collect();
    assert_eq!(keys, vec!["dispatch", "inspection"]);
    assert_eq!(structure.header_groups["dispatch"].original_label, "Dispatch Count");
    assert_eq!(structure.header_groups["inspection"].sub_headers[1].label, "Jodhpur");
}

/// 有効期間内はファイルを読み直さない（内容が変わっても古い構造のまま）
#[test]
fn test_cached_structure_ignores_file_changes() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("Master.xlsx");
    common::write_master(&path, "Master Sheet", &[]);

    let mut cache = StructureCache::new(source(), Duration::from_secs(300));
    let start = Instant::now();
    let first = cache.get_structure_at(&path, start).unwrap();

    // シートを削除したファイルに差し替えても、キャッシュが返る
    common::write_master(&path, "Renamed", &[]);
    let second = cache
        .get_structure_at(&path, start + Duration::from_secs(10))
        .unwrap();
    assert_eq!(first, second);

    // 期限切れで読み直すとシートがない
    assert!(cache
        .get_structure_at(&path, start + Duration::from_secs(301))
        .is_err());
}

/// キャッシュ破棄後は読み直す
#[test]
fn test_invalidate_reloads() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("Master.xlsx");
    common::write_master(&path, "Master Sheet", &[]);

    let mut updater = Updater::new(Config::default());
    assert!(updater.structure(&path).is_ok());

    common::write_master(&path, "Renamed", &[]);
    assert!(updater.structure(&path).is_ok());

    updater.invalidate(&path);
    assert!(updater.structure(&path).is_err());
}
