//! 入力テキストのパーサー
//!
//! `Key: Value` 形式のテキストを1行1フィールドで読み取る。

use serde::Serialize;

/// 入力レコード（入力順を保持するキー・値の並び）
///
/// 同じキーが再度現れた場合は値だけを置き換え、位置は最初の出現のまま。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// キーは大文字小文字を区別する
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// ログ用の要約（"Trade=SC, Location=Jaipur"）
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 入力テキストをレコードに変換
///
/// - コロンを含まない行は無視
/// - 最初のコロンでキーと値に分割し、それぞれ前後の空白を除去
/// - 必須フィールドの検査はしない
///
/// # Examples
/// ```
/// use excel_updater_common::parse_record;
///
/// let record = parse_record("Trade: SC\nLocation: Jaipur\nnote without colon");
/// assert_eq!(record.get("Trade"), Some("SC"));
/// assert_eq!(record.len(), 2);
/// ```
pub fn parse_record(text: &str) -> RawRecord {
    let mut record = RawRecord::new();
    for line in text.trim().lines() {
        if let Some((key, value)) = line.split_once(':') {
            record.insert(key.trim(), value.trim());
        }
    }
    record
}
