//! 更新処理の統合
//!
//! 入力テキスト → レコード → 構造（キャッシュ経由）→ セル解決・加算 → 保存。
//!
//! 1回の更新は「開く・変更・保存」で完結し、ファイルハンドルを残さない。
//! 同じファイルへの同時更新は想定していない（ロックも排他もしない）ため、
//! 呼び出し側で直列化すること。

use crate::backup::create_backup;
use crate::cache::{StructureCache, StructureSource, WorkbookSource};
use crate::config::Config;
use crate::error::{Result, UpdaterError};
use crate::workbook::Workbook;
use excel_updater_common::engine::{resolve_trade, LOCATION_KEY};
use excel_updater_common::{apply_updates, parse_record, RawRecord, SheetStructure, UpdateResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// 1バッチ分の更新結果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub file: PathBuf,
    /// 略称展開後の職種名
    pub trade: String,
    pub location: String,
    pub backup: Option<PathBuf>,
    pub results: Vec<UpdateResult>,
}

impl UpdateReport {
    pub fn updated(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.results.iter().filter_map(UpdateResult::warning)
    }

    pub fn updated_count(&self) -> usize {
        self.updated().count()
    }

    /// 利用者向けの要約
    pub fn summary(&self) -> String {
        let count = self.updated_count();
        if count == 0 {
            return "No cells updated. Check input parameters.".to_string();
        }

        let mut msg = format!("Success! Updated {} cells", count);
        for result in self.updated() {
            msg.push_str(&format!("\n- {}", result.describe()));
        }
        msg
    }
}

/// 設定とキャッシュを保持して更新を実行する
pub struct Updater<S = WorkbookSource> {
    config: Config,
    cache: StructureCache<S>,
}

impl Updater<WorkbookSource> {
    pub fn new(config: Config) -> Self {
        let source = WorkbookSource::new(config.sheet_name.clone(), config.layout);
        Self::with_source(config, source)
    }
}

impl<S: StructureSource> Updater<S> {
    pub fn with_source(config: Config, source: S) -> Self {
        let cache = StructureCache::new(source, config.cache_ttl());
        Self { config, cache }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 構造を取得（キャッシュ有効期間内はファイルを読まない）
    pub fn structure(&mut self, path: &Path) -> Result<SheetStructure> {
        self.cache.get_structure(path)
    }

    /// 対象ファイルが変わったときに呼ぶ
    pub fn invalidate(&mut self, path: &Path) {
        self.cache.invalidate(path);
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// `Key: Value` 形式のテキストで更新
    pub fn update_text(&mut self, path: &Path, text: &str, backup: bool) -> Result<UpdateReport> {
        if text.trim().is_empty() {
            return Err(UpdaterError::EmptyInput);
        }
        let record = parse_record(text);
        self.update_record(path, &record, backup)
    }

    /// レコードで更新
    ///
    /// 構造の読み込み・ワークブックの読み書きの失敗はバッチ全体の失敗。
    /// フィールド単位の失敗は結果に記録して続行する。
    pub fn update_record(
        &mut self,
        path: &Path,
        record: &RawRecord,
        backup: bool,
    ) -> Result<UpdateReport> {
        if !path.exists() {
            return Err(UpdaterError::FileNotFound(path.display().to_string()));
        }
        info!("Processing input: {}", record.summary());

        let backup = if backup {
            Some(create_backup(path)?)
        } else {
            None
        };

        let structure = self.cache.get_structure(path)?;

        let mut workbook = Workbook::open(path)?;
        let sheet = workbook.sheet_mut(&self.config.sheet_name)?;
        let results = apply_updates(
            &mut sheet.grid,
            &structure,
            record,
            &self.config.trade_aliases,
        );

        for result in &results {
            if let UpdateResult::Updated { row, column, .. } = result {
                sheet.mark_edited(*row, *column);
            }
        }

        if results.iter().any(UpdateResult::is_success) {
            let written = workbook.save()?;
            info!("Saved {} ({} cells)", path.display(), written);
        }

        Ok(UpdateReport {
            file: path.to_path_buf(),
            trade: resolve_trade(record, &self.config.trade_aliases),
            location: record.get(LOCATION_KEY).unwrap_or("").to_string(),
            backup,
            results,
        })
    }
}
