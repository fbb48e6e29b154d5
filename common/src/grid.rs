//! セルグリッドモデル
//!
//! ワークシートの値・数式・結合セル範囲を保持する疎なグリッド。
//! 行・列はExcelと同じ1始まり。数式セルの値は最後に計算された結果。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// セル値
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    /// Excelのシリアル日時
    DateTime(f64),
    Error(String),
}

impl CellValue {
    /// 空セル判定（空文字列も空扱い）
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// 加算更新で使う数値変換
    ///
    /// 文字列は前後の空白を除いてから解釈する。日時とエラー値は数値扱いしない。
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Empty | CellValue::DateTime(_) | CellValue::Error(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) | CellValue::DateTime(n) => write!(f, "{}", format_number(*n)),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// 整数値は小数部なしで表示（7.0 → "7"）
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// 結合セル範囲（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRange {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl MergedRange {
    pub fn new(first_row: u32, first_col: u32, last_row: u32, last_col: u32) -> Self {
        Self {
            first_row,
            first_col,
            last_row,
            last_col,
        }
    }

    /// 1行だけの横方向結合か
    pub fn is_single_row(&self) -> bool {
        self.first_row == self.last_row
    }
}

/// ワークシートのセルグリッド
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    cells: HashMap<(u32, u32), CellValue>,
    /// (行, 列) → 数式（先頭の '=' なし）
    formulas: HashMap<(u32, u32), String>,
    merged: Vec<MergedRange>,
    max_row: u32,
    max_col: u32,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// セル値を取得（未設定なら None）
    pub fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col)).filter(|v| !v.is_empty())
    }

    /// セル値を文字列として取得（未設定なら空文字列）
    pub fn value_text(&self, row: u32, col: u32) -> String {
        self.cell(row, col).map(|v| v.to_string()).unwrap_or_default()
    }

    /// セル値を設定（Empty を設定するとセルを削除）
    ///
    /// 値で上書きしたセルの数式は外れる。
    pub fn set_cell(&mut self, row: u32, col: u32, value: impl Into<CellValue>) {
        let value = value.into();
        self.formulas.remove(&(row, col));
        if value == CellValue::Empty {
            self.cells.remove(&(row, col));
            return;
        }
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        self.cells.insert((row, col), value);
    }

    pub fn formula(&self, row: u32, col: u32) -> Option<&str> {
        self.formulas.get(&(row, col)).map(String::as_str)
    }

    /// 数式を設定（計算結果は `set_cell` で先に入れておく）
    pub fn set_formula(&mut self, row: u32, col: u32, formula: impl Into<String>) {
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        self.formulas.insert((row, col), formula.into());
    }

    pub fn add_merged_range(&mut self, range: MergedRange) {
        self.max_row = self.max_row.max(range.last_row);
        self.max_col = self.max_col.max(range.last_col);
        self.merged.push(range);
    }

    pub fn merged_ranges(&self) -> &[MergedRange] {
        &self.merged
    }

    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    pub fn max_column(&self) -> u32 {
        self.max_col
    }

    /// 値のあるセルを (行, 列, 値) で列挙
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &CellValue)> {
        self.cells.iter().map(|(&(r, c), v)| (r, c, v))
    }
}

/// 列番号（1始まり）をA1形式の列名に変換
pub fn column_letter(col: u32) -> String {
    let mut n = col;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A1形式のセル参照（例: "J7"）
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", column_letter(col), row)
}
