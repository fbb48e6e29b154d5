use thiserror::Error;

/// バッチ全体を中断するエラー
///
/// フィールド単位の解決失敗は `excel_updater_common::Error` として結果に記録され、
/// ここには来ない。
#[derive(Error, Debug)]
pub enum UpdaterError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Worksheet not found: '{0}'")]
    SheetNotFound(String),

    #[error("Failed to read workbook: {0}")]
    ExcelRead(String),

    #[error("Failed to write workbook: {0}")]
    ExcelWrite(String),

    #[error("Please enter input text")]
    EmptyInput,

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] excel_updater_common::Error),
}

impl From<calamine::XlsxError> for UpdaterError {
    fn from(e: calamine::XlsxError) -> Self {
        UpdaterError::ExcelRead(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UpdaterError>;
