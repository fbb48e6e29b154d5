//! 職種の略称テーブル
//!
//! 入力の `Trade` に書かれた略称（"SC" など）を正式な職種名に展開する。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 略称 → 職種名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeAliases {
    entries: BTreeMap<String, String>,
}

impl Default for TradeAliases {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("SC".into(), "Sculptor".into());
        Self { entries }
    }
}

impl TradeAliases {
    /// JSON文字列から読み込み（`{"SC": "Sculptor"}`）
    pub fn from_json(json: &str) -> Result<Self> {
        let aliases: Self = serde_json::from_str(json)?;
        Ok(aliases)
    }

    pub fn insert(&mut self, abbreviation: impl Into<String>, trade: impl Into<String>) {
        self.entries.insert(abbreviation.into(), trade.into());
    }

    /// 略称を展開する。完全一致のみで、未登録ならそのまま返す
    pub fn resolve<'a>(&'a self, abbreviation: &'a str) -> &'a str {
        self.entries
            .get(abbreviation)
            .map(String::as_str)
            .unwrap_or(abbreviation)
    }

    /// 設定をマージ（後から追加した設定が優先）
    pub fn merge(&mut self, other: &TradeAliases) {
        self.entries.extend(other.entries.clone());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
