//! ログ初期化
//!
//! tracing-subscriber で `[HH:MM:SS] LEVEL target: message` 形式の行を標準エラーに出す。
//!
//! # 環境変数
//! - RUST_LOG: ログレベルのフィルタ（既定: info、`--verbose` 指定時は debug）

use std::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::EnvFilter;

/// ローカル時刻の時分秒
struct LocalClock;

impl FormatTime for LocalClock {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "[{}]", chrono::Local::now().format("%H:%M:%S"))
    }
}

/// ログを初期化
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalClock)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// テスト用（出力をテストハーネスに渡す）
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_timer(LocalClock)
        .with_test_writer()
        .try_init();
}
