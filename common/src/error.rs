//! エラー型定義
//!
//! フィールド単位で回復されるエラー（解決失敗・数値パース失敗）と、
//! 略称テーブルの読み込みエラーを扱う。
//! バッチ全体を中断するエラーはCLI側の `UpdaterError` に置く。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Trade '{trade}' not found in column {column}")]
    TradeNotFound { trade: String, column: u32 },

    #[error("No header found matching '{data_type}'. Available: {}", .available.join(", "))]
    HeaderNotFound {
        data_type: String,
        available: Vec<String>,
    },

    #[error("Location '{location}' not found under '{header}'. Available: {}", .available.join(", "))]
    LocationNotFound {
        location: String,
        header: String,
        available: Vec<String>,
    },

    #[error("Invalid number for '{field}': '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("Invalid alias table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
