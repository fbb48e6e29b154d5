//! Excel Updater
//!
//! 「Master Sheet」の構造（職種列・結合ヘッダー・拠点列）を推定し、
//! `Key: Value` 形式の入力を該当セルに加算する。

pub mod backup;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod updater;
pub mod workbook;

pub use excel_updater_common as common;
