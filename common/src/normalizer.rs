//! ヘッダー名の正規化
//!
//! "Dispatch Count" や "Inspection Kits" のような表記ゆれを
//! 照合キー（"dispatch", "inspection"）にそろえる。

use regex::Regex;

/// 見出しから取り除く語
const NOISE_WORDS: &str = r"\b(kits?|quantity|total|count)\b";

/// 部分一致で固定キーに置き換える規則（先勝ち）
const OVERRIDES: &[(&str, &str)] = &[("inspect", "inspection"), ("dispatch", "dispatch")];

/// ヘッダー文字列を照合キーに正規化する
///
/// 1. 小文字化・前後の空白除去
/// 2. ノイズ語（kit/kits/quantity/total/count）の除去
/// 3. 英数字・空白以外の文字を除去し、連続空白を1つにまとめる
/// 4. "inspect" を含めば "inspection"、"dispatch" を含めば "dispatch"
///
/// 2〜3は変化がなくなるまで繰り返す（"to-tal" → "total" → ""）。
/// そのため `normalize_header(normalize_header(x)) == normalize_header(x)`。
///
/// # Examples
/// ```
/// use excel_updater_common::normalize_header;
///
/// assert_eq!(normalize_header("Dispatch Count"), "dispatch");
/// assert_eq!(normalize_header("Inspection Kits"), "inspection");
/// ```
pub fn normalize_header(raw: &str) -> String {
    lazy_static::lazy_static! {
        static ref NOISE_RE: Regex = Regex::new(NOISE_WORDS).unwrap();
        static ref SPECIAL_RE: Regex = Regex::new(r"[^\w\s]").unwrap();
        static ref SPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    }

    let mut header = raw.to_lowercase().trim().to_string();
    loop {
        let stripped = NOISE_RE.replace_all(&header, "");
        let stripped = SPECIAL_RE.replace_all(&stripped, "");
        let cleaned = SPACE_RE.replace_all(&stripped, " ").trim().to_string();
        if cleaned == header {
            break;
        }
        header = cleaned;
    }

    for (needle, key) in OVERRIDES {
        if header.contains(needle) {
            return (*key).to_string();
        }
    }
    header
}
