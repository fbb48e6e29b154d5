//! ワークシート構造の推定
//!
//! 列・行の配置が固定されていないシートから、
//! 職種列・職種の開始行・ヘッダーグループ（結合セル）とその下のサブ列を読み取る。

use crate::grid::Grid;
use crate::layout::SheetLayout;
use crate::normalizer::normalize_header;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// ヘッダーグループ直下のサブヘッダー（拠点列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubHeader {
    pub label: String,
    pub column: u32,
}

/// 結合セルで表されたヘッダーグループ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderGroup {
    /// シート上の元の見出し
    pub original_label: String,
    pub start_column: u32,
    pub end_column: u32,
    /// 列番号の昇順
    pub sub_headers: Vec<SubHeader>,
}

/// 推定されたシート構造
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetStructure {
    pub trade_column: u32,
    pub trade_start_row: u32,
    /// 正規化キー → ヘッダーグループ
    pub header_groups: BTreeMap<String, HeaderGroup>,
}

impl SheetStructure {
    /// 開始列の昇順でヘッダーグループを列挙（同列ならキー順）
    pub fn groups_by_column(&self) -> Vec<(&str, &HeaderGroup)> {
        let mut groups: Vec<(&str, &HeaderGroup)> = self
            .header_groups
            .iter()
            .map(|(k, g)| (k.as_str(), g))
            .collect();
        groups.sort_by(|a, b| a.1.start_column.cmp(&b.1.start_column).then(a.0.cmp(b.0)));
        groups
    }

    /// 検出した元の見出し（開始列順）
    pub fn detected_labels(&self) -> Vec<&str> {
        self.groups_by_column()
            .into_iter()
            .map(|(_, g)| g.original_label.as_str())
            .collect()
    }
}

/// シートの構造を推定する
///
/// - 職種列: 見出し行で "trade" を含む最初の列（大文字小文字を区別しない）。
///   見つからなければ `fallback_trade_column` を使う
/// - ヘッダーグループ: 見出し行またはその次の行にある1行だけの結合セル。
///   左上セルが空の結合は無視し、正規化キーが重複した場合は後の結合で上書きする。
///   結合は (行, 列) の順に処理する
pub fn detect_structure(grid: &Grid, layout: &SheetLayout) -> SheetStructure {
    let trade_column = match find_trade_column(grid, layout.header_row) {
        Some(col) => col,
        None => {
            warn!(
                column = layout.fallback_trade_column,
                "Trade column not found, using default"
            );
            layout.fallback_trade_column
        }
    };

    let mut ranges: Vec<_> = grid
        .merged_ranges()
        .iter()
        .filter(|r| r.is_single_row() && layout.is_group_row(r.first_row))
        .collect();
    ranges.sort_by_key(|r| (r.first_row, r.first_col));

    let mut header_groups = BTreeMap::new();
    for range in ranges {
        let label = grid.value_text(range.first_row, range.first_col);
        if label.is_empty() {
            continue;
        }

        let sub_row = range.first_row + 1;
        let sub_headers = (range.first_col..=range.last_col)
            .filter_map(|col| {
                let text = grid.value_text(sub_row, col);
                (!text.is_empty()).then_some(SubHeader { label: text, column: col })
            })
            .collect();

        header_groups.insert(
            normalize_header(&label),
            HeaderGroup {
                original_label: label,
                start_column: range.first_col,
                end_column: range.last_col,
                sub_headers,
            },
        );
    }

    let structure = SheetStructure {
        trade_column,
        trade_start_row: layout.trade_start_row,
        header_groups,
    };
    info!("Detected headers: {}", structure.detected_labels().join(", "));
    structure
}

fn find_trade_column(grid: &Grid, header_row: u32) -> Option<u32> {
    (1..=grid.max_column()).find(|&col| {
        grid.value_text(header_row, col)
            .to_lowercase()
            .contains("trade")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MergedRange;

    fn sample_grid() -> Grid {
        let mut grid = Grid::new();
        grid.set_cell(3, 2, "S.No");
        grid.set_cell(3, 3, "Trade Name");

        grid.set_cell(3, 10, "Dispatch Count");
        grid.add_merged_range(MergedRange::new(3, 10, 3, 12));
        grid.set_cell(4, 10, "Jaipur");
        grid.set_cell(4, 12, "Udaipur");

        grid.set_cell(3, 14, "Inspection Kits");
        grid.add_merged_range(MergedRange::new(3, 14, 3, 15));
        grid.set_cell(4, 14, "Jaipur");
        grid.set_cell(4, 15, "Jodhpur");

        grid.set_cell(5, 3, "Mason");
        grid.set_cell(7, 3, "Sculptor");
        grid
    }

    #[test]
    fn test_detect_trade_column() {
        let structure = detect_structure(&sample_grid(), &SheetLayout::default());
        assert_eq!(structure.trade_column, 3);
        assert_eq!(structure.trade_start_row, 5);
    }

    #[test]
    fn test_trade_column_case_insensitive() {
        let mut grid = Grid::new();
        grid.set_cell(3, 5, "TRADES");
        let structure = detect_structure(&grid, &SheetLayout::default());
        assert_eq!(structure.trade_column, 5);
    }

    #[test]
    fn test_trade_column_fallback() {
        let mut grid = Grid::new();
        grid.set_cell(3, 1, "Name");
        grid.set_cell(2, 4, "Trade");
        let structure = detect_structure(&grid, &SheetLayout::default());
        assert_eq!(structure.trade_column, 3);
        assert_eq!(structure.trade_start_row, 5);
    }

    #[test]
    fn test_detect_header_groups() {
        let structure = detect_structure(&sample_grid(), &SheetLayout::default());
        assert_eq!(structure.header_groups.len(), 2);

        let dispatch = &structure.header_groups["dispatch"];
        assert_eq!(dispatch.original_label, "Dispatch Count");
        assert_eq!((dispatch.start_column, dispatch.end_column), (10, 12));
        assert_eq!(
            dispatch.sub_headers,
            vec![
                SubHeader { label: "Jaipur".into(), column: 10 },
                SubHeader { label: "Udaipur".into(), column: 12 },
            ]
        );

        let inspection = &structure.header_groups["inspection"];
        assert_eq!(inspection.sub_headers[0].column, 14);
        assert_eq!(structure.detected_labels(), vec!["Dispatch Count", "Inspection Kits"]);
    }

    #[test]
    fn test_ignores_multi_row_and_out_of_band_merges() {
        let mut grid = Grid::new();
        grid.set_cell(3, 4, "Remarks");
        grid.add_merged_range(MergedRange::new(3, 4, 4, 4));
        grid.set_cell(2, 6, "Title");
        grid.add_merged_range(MergedRange::new(2, 6, 2, 9));
        grid.set_cell(5, 6, "Body");
        grid.add_merged_range(MergedRange::new(5, 6, 5, 9));

        let structure = detect_structure(&grid, &SheetLayout::default());
        assert!(structure.header_groups.is_empty());
    }

    #[test]
    fn test_row_four_group_reads_row_five() {
        let mut grid = Grid::new();
        grid.set_cell(4, 6, "Returns");
        grid.add_merged_range(MergedRange::new(4, 6, 4, 7));
        grid.set_cell(5, 7, "Ajmer");

        let structure = detect_structure(&grid, &SheetLayout::default());
        let returns = &structure.header_groups["returns"];
        assert_eq!(returns.sub_headers, vec![SubHeader { label: "Ajmer".into(), column: 7 }]);
    }

    #[test]
    fn test_empty_anchor_skipped() {
        let mut grid = Grid::new();
        grid.add_merged_range(MergedRange::new(3, 6, 3, 8));
        grid.set_cell(4, 6, "Jaipur");
        let structure = detect_structure(&grid, &SheetLayout::default());
        assert!(structure.header_groups.is_empty());
    }

    #[test]
    fn test_colliding_keys_later_range_wins() {
        let mut grid = Grid::new();
        grid.set_cell(3, 20, "Dispatch Total");
        grid.add_merged_range(MergedRange::new(3, 20, 3, 21));
        grid.set_cell(3, 10, "Dispatch Count");
        grid.add_merged_range(MergedRange::new(3, 10, 3, 11));

        let structure = detect_structure(&grid, &SheetLayout::default());
        assert_eq!(structure.header_groups.len(), 1);
        assert_eq!(structure.header_groups["dispatch"].original_label, "Dispatch Total");
    }
}
