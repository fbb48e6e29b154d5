//! セル位置の解決
//!
//! (職種, 拠点, データ種別) を推定済みの構造から (行, 列) に変換する。

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::normalizer::normalize_header;
use crate::structure::{HeaderGroup, SheetStructure};
use tracing::debug;

/// 職種の行を探す
///
/// 職種列を開始行から最終行まで走査し、セルの文字列が `trade` を含む最初の行を返す
/// （大文字小文字を区別する部分一致）。
/// 数値セルは `CellValue` の表示形式で比較する（7.0 は "7"）。
pub fn find_trade_row(grid: &Grid, structure: &SheetStructure, trade: &str) -> Result<u32> {
    (structure.trade_start_row..=grid.max_row())
        .find(|&row| {
            grid.cell(row, structure.trade_column)
                .is_some_and(|v| v.to_string().contains(trade))
        })
        .ok_or_else(|| Error::TradeNotFound {
            trade: trade.to_string(),
            column: structure.trade_column,
        })
}

/// データ種別に対応するヘッダーグループを探す
///
/// 正規化したデータ種別を含むキーのうち、開始列が最も左のグループを選ぶ。
pub fn find_header_group<'a>(
    structure: &'a SheetStructure,
    data_type: &str,
) -> Result<(&'a str, &'a HeaderGroup)> {
    let normalized = normalize_header(data_type);
    let groups = structure.groups_by_column();

    groups
        .iter()
        .find(|(key, _)| key.contains(normalized.as_str()))
        .copied()
        .ok_or_else(|| Error::HeaderNotFound {
            data_type: data_type.to_string(),
            available: groups.iter().map(|(key, _)| key.to_string()).collect(),
        })
}

/// ヘッダーグループ内で拠点の列を探す（大文字小文字を区別しない部分一致）
pub fn find_location_column(key: &str, group: &HeaderGroup, location: &str) -> Result<u32> {
    let needle = location.to_lowercase();
    group
        .sub_headers
        .iter()
        .find(|sub| sub.label.to_lowercase().contains(&needle))
        .map(|sub| sub.column)
        .ok_or_else(|| Error::LocationNotFound {
            location: location.to_string(),
            header: key.to_string(),
            available: group.sub_headers.iter().map(|s| s.label.clone()).collect(),
        })
}

/// 更新対象のセル (行, 列) を解決する
pub fn resolve_cell(
    grid: &Grid,
    structure: &SheetStructure,
    trade: &str,
    location: &str,
    data_type: &str,
) -> Result<(u32, u32)> {
    let row = find_trade_row(grid, structure, trade)?;
    let (key, group) = find_header_group(structure, data_type)?;
    let column = find_location_column(key, group, location)?;
    debug!(trade, location, data_type, header = key, row, column, "Resolved target cell");
    Ok((row, column))
}
