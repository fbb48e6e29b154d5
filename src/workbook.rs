//! ワークブックの読み書き
//!
//! calamine で全シート（値・数式・結合セル）を読み込み、読み込み後はファイルハンドルを保持しない。
//! 保存は umya-spreadsheet で元ファイルを開き直し、変更したセルだけを書き換える。
//! 書式・列幅・数式・他のシートはそのまま残る。

use crate::error::{Result, UpdaterError};
use calamine::{open_workbook, Data, Reader, Xlsx};
use excel_updater_common::{CellValue, Grid, MergedRange};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 1枚のワークシート
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    pub name: String,
    pub grid: Grid,
    /// 保存時に書き戻すセル (行, 列)
    edited: BTreeSet<(u32, u32)>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// グリッドの現在値を保存対象にする
    pub fn mark_edited(&mut self, row: u32, col: u32) {
        self.edited.insert((row, col));
    }

    pub fn edited_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.edited.iter().copied()
    }
}

/// メモリ上のワークブック
#[derive(Debug, Clone)]
pub struct Workbook {
    path: PathBuf,
    sheets: Vec<Worksheet>,
}

impl Workbook {
    /// xlsx ファイルを開いて全シートを読み込む
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(UpdaterError::FileNotFound(path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)?;
        workbook.load_merged_regions()?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let mut sheet = Worksheet::new(name.clone());

            let range = workbook.worksheet_range(&name)?;
            if let Some((start_row, start_col)) = range.start() {
                for (r, c, data) in range.cells() {
                    let value = convert_data(data);
                    if !value.is_empty() {
                        sheet.grid.set_cell(start_row + r as u32 + 1, start_col + c as u32 + 1, value);
                    }
                }
            }

            // 値の後に入れる（set_cell は数式を外すため）
            let formulas = workbook.worksheet_formula(&name)?;
            if let Some((start_row, start_col)) = formulas.start() {
                for (r, c, formula) in formulas.cells() {
                    if !formula.is_empty() {
                        sheet.grid.set_formula(start_row + r as u32 + 1, start_col + c as u32 + 1, formula.clone());
                    }
                }
            }

            for (_, _, dims) in workbook.merged_regions_by_sheet(&name) {
                sheet.grid.add_merged_range(MergedRange::new(
                    dims.start.0 + 1,
                    dims.start.1 + 1,
                    dims.end.0 + 1,
                    dims.end.1 + 1,
                ));
            }

            debug!(
                sheet = %sheet.name,
                rows = sheet.grid.max_row(),
                columns = sheet.grid.max_column(),
                merged = sheet.grid.merged_ranges().len(),
                "Loaded worksheet"
            );
            sheets.push(sheet);
        }

        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&self, name: &str) -> Result<&Worksheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| UpdaterError::SheetNotFound(name.to_string()))
    }

    pub fn sheet_mut(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.sheets
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| UpdaterError::SheetNotFound(name.to_string()))
    }

    /// 開いたファイルに変更セルを書き戻す
    pub fn save(&self) -> Result<usize> {
        self.save_as(&self.path)
    }

    /// 開いたファイルを元に、変更セルだけを書き換えて `path` に保存する
    ///
    /// 変更したセル数を返す。
    pub fn save_as(&self, path: &Path) -> Result<usize> {
        let mut book = umya_spreadsheet::reader::xlsx::read(&self.path)
            .map_err(|e| UpdaterError::ExcelRead(e.to_string()))?;

        let mut written = 0;
        for sheet in self.sheets.iter().filter(|s| !s.edited.is_empty()) {
            let target = book
                .get_sheet_by_name_mut(&sheet.name)
                .ok_or_else(|| UpdaterError::SheetNotFound(sheet.name.clone()))?;

            for (row, col) in sheet.edited_cells() {
                // umya は (列, 行) の順
                let cell = target.get_cell_mut((col, row));
                match sheet.grid.cell(row, col) {
                    Some(CellValue::Number(n)) => {
                        cell.set_value_number(*n);
                    }
                    Some(CellValue::Bool(b)) => {
                        cell.set_value_bool(*b);
                    }
                    Some(other) => {
                        cell.set_value(other.to_string());
                    }
                    None => {
                        cell.set_value("");
                    }
                }
                written += 1;
            }
        }

        umya_spreadsheet::writer::xlsx::write(&book, path)
            .map_err(|e| UpdaterError::ExcelWrite(e.to_string()))?;
        debug!(path = %path.display(), cells = written, "Saved workbook");
        Ok(written)
    }
}

fn convert_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}
