//! 加算更新エンジン
//!
//! 入力レコードの各データ種別について対象セルを解決し、
//! 既存値に数値を加算して書き戻す。フィールド単位の失敗はバッチを中断しない。

use crate::alias::TradeAliases;
use crate::error::{Error, Result};
use crate::grid::{cell_ref, format_number, CellValue, Grid};
use crate::record::RawRecord;
use crate::resolver::resolve_cell;
use crate::structure::SheetStructure;
use serde::Serialize;
use tracing::{error, info, warn};

/// データ種別として扱わないキー
pub const TRADE_KEY: &str = "Trade";
pub const LOCATION_KEY: &str = "Location";

/// フィールドごとの更新結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum UpdateResult {
    #[serde(rename_all = "camelCase")]
    Updated {
        field: String,
        cell_ref: String,
        row: u32,
        column: u32,
        /// 更新前のセル値（空なら None）
        previous: Option<String>,
        value: f64,
        /// 既存値が数値でなく置き換えた場合の警告
        warning: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Failed { field: String, reason: String },
}

impl UpdateResult {
    pub fn field(&self) -> &str {
        match self {
            UpdateResult::Updated { field, .. } | UpdateResult::Failed { field, .. } => field,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UpdateResult::Updated { .. })
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            UpdateResult::Updated { warning, .. } => warning.as_deref(),
            UpdateResult::Failed { .. } => None,
        }
    }

    /// 要約1行（"Dispatch at J7 (New value: 8)"）
    pub fn describe(&self) -> String {
        match self {
            UpdateResult::Updated { field, cell_ref, value, .. } => {
                format!("{} at {} (New value: {})", field, cell_ref, format_number(*value))
            }
            UpdateResult::Failed { field, reason } => format!("{} failed: {}", field, reason),
        }
    }
}

/// 略称テーブルで職種名を展開（`Trade` がなければ空文字列）
pub fn resolve_trade(record: &RawRecord, aliases: &TradeAliases) -> String {
    aliases.resolve(record.get(TRADE_KEY).unwrap_or("")).to_string()
}

/// 加算する値をパース（桁区切りのカンマは除去）
pub fn parse_delta(field: &str, value: &str) -> Result<f64> {
    value
        .replace(',', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| Error::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// 既存値に加算した新しい値
///
/// - 空セル: delta
/// - 数値として読める: 既存値 + delta
/// - 数値でない: delta に置き換え、警告を返す
pub fn accumulate(existing: Option<&CellValue>, delta: f64) -> (f64, Option<String>) {
    match existing {
        None => (delta, None),
        Some(current) => match current.as_number() {
            Some(n) => (n + delta, None),
            None => (delta, Some(reset_warning(&current.to_string(), delta))),
        },
    }
}

fn reset_warning(existing: &str, delta: f64) -> String {
    format!(
        "Existing value '{}' was not numeric. Reset to {}",
        existing,
        format_number(delta)
    )
}

/// レコードの全データ種別をシートに適用する
///
/// `Trade` と `Location` 以外のキーをデータ種別、値を加算量として扱い、
/// 入力順に1フィールド1件の結果を返す。
pub fn apply_updates(
    grid: &mut Grid,
    structure: &SheetStructure,
    record: &RawRecord,
    aliases: &TradeAliases,
) -> Vec<UpdateResult> {
    let trade = resolve_trade(record, aliases);
    let location = record.get(LOCATION_KEY).unwrap_or("");

    record
        .iter()
        .filter(|(key, _)| *key != TRADE_KEY && *key != LOCATION_KEY)
        .map(|(data_type, value)| {
            match apply_field(grid, structure, &trade, location, data_type, value) {
                Ok(result) => result,
                Err(e) => {
                    error!("Error updating {}: {}", data_type, e);
                    UpdateResult::Failed {
                        field: data_type.to_string(),
                        reason: e.to_string(),
                    }
                }
            }
        })
        .collect()
}

fn apply_field(
    grid: &mut Grid,
    structure: &SheetStructure,
    trade: &str,
    location: &str,
    data_type: &str,
    value: &str,
) -> Result<UpdateResult> {
    let delta = parse_delta(data_type, value)?;
    let (row, column) = resolve_cell(grid, structure, trade, location, data_type)?;

    // 数式セルは計算結果ではなく数式そのものを既存値とみなす（数値ではない）
    let (previous, (new_value, warning)) = match grid.formula(row, column) {
        Some(formula) => {
            let formula = format!("={}", formula);
            let warning = reset_warning(&formula, delta);
            (Some(formula), (delta, Some(warning)))
        }
        None => {
            let previous = grid.cell(row, column);
            (previous.map(|v| v.to_string()), accumulate(previous, delta))
        }
    };
    if let Some(message) = &warning {
        warn!("{}", message);
    }

    grid.set_cell(row, column, CellValue::Number(new_value));
    info!(
        "Updated {} for {}/{}: {} -> {}",
        data_type,
        trade,
        location,
        previous.as_deref().unwrap_or("(empty)"),
        format_number(new_value)
    );

    Ok(UpdateResult::Updated {
        field: data_type.to_string(),
        cell_ref: cell_ref(row, column),
        row,
        column,
        previous,
        value: new_value,
        warning,
    })
}
