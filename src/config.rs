use crate::error::{UpdaterError, Result};
use excel_updater_common::{SheetLayout, TradeAliases};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// ユーザー設定（~/.config/excel-updater/config.json）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 既定の対象ファイル
    pub default_file: PathBuf,
    /// 更新対象のワークシート名
    pub sheet_name: String,
    /// 更新前にバックアップを作成する
    pub create_backup: bool,
    /// 構造キャッシュの有効期間（秒）
    pub cache_ttl_seconds: u64,
    /// 職種の略称（既定テーブルに上書きマージされる）
    pub trade_aliases: TradeAliases,
    pub layout: SheetLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_file: PathBuf::from("Master.xlsx"),
            sheet_name: "Master Sheet".into(),
            create_backup: true,
            cache_ttl_seconds: 300,
            trade_aliases: TradeAliases::default(),
            layout: SheetLayout::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込み。ファイルがなければ既定値
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;

        // 既定の略称の上に設定ファイルの略称を重ねる
        let mut aliases = TradeAliases::default();
        aliases.merge(&config.trade_aliases);
        config.trade_aliases = aliases;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| UpdaterError::Config("Home directory not found".into()))?;
        Ok(home.join(".config").join("excel-updater").join("config.json"))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// JSONファイル（`{"SC": "Sculptor"}`）の略称を取り込む
    ///
    /// 取り込んだ件数を返す。既存の略称は上書きされる。
    pub fn import_aliases(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)?;
        let aliases = TradeAliases::from_json(&content)?;
        self.trade_aliases.merge(&aliases);
        Ok(aliases.len())
    }

    /// "ABBR=Name" 形式で略称を追加
    pub fn add_alias(&mut self, spec: &str) -> Result<()> {
        let (abbr, name) = spec
            .split_once('=')
            .map(|(a, n)| (a.trim(), n.trim()))
            .filter(|(a, n)| !a.is_empty() && !n.is_empty())
            .ok_or_else(|| UpdaterError::Config(format!("Expected ABBR=Name, got '{}'", spec)))?;
        self.trade_aliases.insert(abbr, name);
        Ok(())
    }
}
