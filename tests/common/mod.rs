//! テスト用ワークブックの生成

#![allow(dead_code)]

use rust_xlsxwriter::{Format, Formula, Workbook, Worksheet};
use std::path::Path;

/// Master Sheet のフィクスチャ
///
/// - C3: "Trade Name"、C5〜C7: Mason / Painter / Sculptor
/// - J3:L3 結合 "Dispatch Count"、J4/K4: Jaipur / Udaipur
/// - N3:O3 結合 "Inspection Kits"、N4/O4: Jaipur / Jodhpur
pub fn write_master(path: &Path, sheet_name: &str, existing: &[(u32, u16, &str)]) {
    let mut workbook = Workbook::new();
    add_notes(&mut workbook);
    let sheet = workbook.add_worksheet();
    fill_master(sheet, sheet_name, existing);
    workbook.save(path).unwrap();
}

/// 書式付きの Master Sheet
///
/// `write_master` の内容に加えて:
/// - C列の幅 30
/// - C7 は数式 `="Sculptor"`（計算結果付き）
/// - J7 は太字・"0.00" 書式の数値 4
/// - C8 は "Carver"、J8 は `=SUM(J5:J7)`（計算結果 4）
pub fn write_styled_master(path: &Path) {
    let mut workbook = Workbook::new();
    add_notes(&mut workbook);
    let sheet = workbook.add_worksheet();
    fill_master(sheet, "Master Sheet", &[]);

    let bold = Format::new().set_bold().set_num_format("0.00");
    sheet.set_column_width(2, 30).unwrap();
    sheet
        .write_formula(6, 2, Formula::new("=\"Sculptor\"").set_result("Sculptor"))
        .unwrap();
    sheet.write_number_with_format(6, 9, 4.0, &bold).unwrap();
    sheet.write_string(7, 2, "Carver").unwrap();
    sheet
        .write_formula(7, 9, Formula::new("=SUM(J5:J7)").set_result("4"))
        .unwrap();

    workbook.save(path).unwrap();
}

fn add_notes(workbook: &mut Workbook) {
    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "keep me").unwrap();
}

fn fill_master(sheet: &mut Worksheet, sheet_name: &str, existing: &[(u32, u16, &str)]) {
    let format = Format::new();

    sheet.set_name(sheet_name).unwrap();
    sheet.write_string(2, 2, "Trade Name").unwrap();
    sheet.merge_range(2, 9, 2, 11, "Dispatch Count", &format).unwrap();
    sheet.write_string(3, 9, "Jaipur").unwrap();
    sheet.write_string(3, 10, "Udaipur").unwrap();
    sheet.merge_range(2, 13, 2, 14, "Inspection Kits", &format).unwrap();
    sheet.write_string(3, 13, "Jaipur").unwrap();
    sheet.write_string(3, 14, "Jodhpur").unwrap();
    sheet.write_string(4, 2, "Mason").unwrap();
    sheet.write_string(5, 2, "Painter").unwrap();
    sheet.write_string(6, 2, "Sculptor").unwrap();

    // (行, 列) は1始まり
    for &(row, col, value) in existing {
        match value.parse::<f64>() {
            Ok(n) => sheet.write_number(row - 1, col - 1, n).unwrap(),
            Err(_) => sheet.write_string(row - 1, col - 1, value).unwrap(),
        };
    }
}
