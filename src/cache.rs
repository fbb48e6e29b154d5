//! シート構造キャッシュ
//!
//! ファイルパスごとに推定済みの構造を保持し、有効期間内はファイルを読まずに返す。
//! ファイル内容の変更は検知しないため、対象ファイルを切り替えたときは
//! 呼び出し側で `invalidate` / `clear` すること。

use crate::error::Result;
use crate::workbook::Workbook;
use excel_updater_common::{detect_structure, SheetLayout, SheetStructure};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// 構造の取得元
pub trait StructureSource {
    fn load_structure(&self, path: &Path) -> Result<SheetStructure>;
}

/// ワークブックの指定シートから構造を推定する
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    pub sheet_name: String,
    pub layout: SheetLayout,
}

impl WorkbookSource {
    pub fn new(sheet_name: impl Into<String>, layout: SheetLayout) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            layout,
        }
    }
}

impl StructureSource for WorkbookSource {
    fn load_structure(&self, path: &Path) -> Result<SheetStructure> {
        let workbook = Workbook::open(path)?;
        let sheet = workbook.sheet(&self.sheet_name)?;
        Ok(detect_structure(&sheet.grid, &self.layout))
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    structure: SheetStructure,
    loaded_at: Instant,
}

/// パスごとの構造キャッシュ
///
/// キーは呼び出し側が渡したパスそのもの（正規化しない）。
#[derive(Debug)]
pub struct StructureCache<S> {
    source: S,
    ttl: Duration,
    entries: HashMap<PathBuf, CacheEntry>,
}

impl<S: StructureSource> StructureCache<S> {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entries: HashMap::new(),
        }
    }

    /// キャッシュ済みの構造か、期限切れなら再推定した構造を返す
    pub fn get_structure(&mut self, path: &Path) -> Result<SheetStructure> {
        self.get_structure_at(path, Instant::now())
    }

    /// 現在時刻を指定して取得
    pub fn get_structure_at(&mut self, path: &Path, now: Instant) -> Result<SheetStructure> {
        if let Some(entry) = self.entries.get(path) {
            if now.saturating_duration_since(entry.loaded_at) < self.ttl {
                debug!(path = %path.display(), "Using cached structure");
                return Ok(entry.structure.clone());
            }
        }

        let structure = self.source.load_structure(path).map_err(|e| {
            error!("Structure detection error: {}", e);
            e
        })?;
        info!(
            path = %path.display(),
            trade_column = structure.trade_column,
            groups = structure.header_groups.len(),
            "Loaded sheet structure"
        );
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                structure: structure.clone(),
                loaded_at: now,
            },
        );
        Ok(structure)
    }

    /// 指定パスのエントリを削除
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
