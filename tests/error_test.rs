//! エラーケーステスト
//!
//! バッチ全体を中断するエラーの扱いを検証

use excel_updater::config::Config;
use excel_updater::error::UpdaterError;
use excel_updater::updater::Updater;
use excel_updater::workbook::Workbook;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを開いた場合
#[test]
fn test_open_nonexistent_file() {
    let result = Workbook::open(Path::new("/nonexistent/path/12345.xlsx"));
    assert!(matches!(result, Err(UpdaterError::FileNotFound(_))));
}

/// xlsxでないファイルを開いた場合
#[test]
fn test_open_invalid_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "not a zip archive").unwrap();

    let result = Workbook::open(&path);
    assert!(matches!(result, Err(UpdaterError::ExcelRead(_))));
}

/// 壊れたファイルの更新はバックアップ後に失敗し、元ファイルは変わらない
#[test]
fn test_update_invalid_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "not a zip archive").unwrap();

    let mut updater = Updater::new(Config::default());
    let result = updater.update_text(&path, "Trade: SC\nDispatch: 1", true);

    assert!(matches!(result, Err(UpdaterError::ExcelRead(_))));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not a zip archive");
}

/// 空の入力
#[test]
fn test_empty_input() {
    let mut updater = Updater::new(Config::default());
    let result = updater.update_text(Path::new("Master.xlsx"), "", false);
    assert!(matches!(result, Err(UpdaterError::EmptyInput)));
}

/// UpdaterErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        UpdaterError::Config("bad config".to_string()),
        UpdaterError::FileNotFound("Master.xlsx".to_string()),
        UpdaterError::SheetNotFound("Master Sheet".to_string()),
        UpdaterError::ExcelRead("zip error".to_string()),
        UpdaterError::ExcelWrite("merge overlap".to_string()),
        UpdaterError::EmptyInput,
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: UpdaterError = io_err.into();

    assert!(matches!(err, UpdaterError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// 略称ファイルの読み込み失敗は common::Error として透過的に伝わる
#[test]
fn test_common_error_conversion() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("aliases.json");
    std::fs::write(&path, "{ broken").unwrap();

    let mut config = Config::default();
    let err = config.import_aliases(&path).unwrap_err();

    assert!(matches!(err, UpdaterError::Common(_)));
    assert!(format!("{}", err).starts_with("Invalid alias table:"));
}
