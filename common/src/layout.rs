//! シートレイアウト定義
//!
//! 「Master Sheet」の行・列の約束事。
//! - 3行目: 職種列の見出しと、ヘッダーグループ（結合セル）の開始行
//! - 4行目: ヘッダーグループの開始行にもなり得る（その場合サブヘッダーは5行目）
//! - 5行目以降: 職種の行

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// 職種列を探す見出し行
    pub header_row: u32,
    /// 職種の開始行
    pub trade_start_row: u32,
    /// 職種列が見つからない場合の列（C列）
    pub fallback_trade_column: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_row: 3,
            trade_start_row: 5,
            fallback_trade_column: 3,
        }
    }
}

impl SheetLayout {
    /// ヘッダーグループとして扱う結合行か
    pub fn is_group_row(&self, row: u32) -> bool {
        row == self.header_row || row == self.header_row + 1
    }
}
