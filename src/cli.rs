use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "excel-updater")]
#[command(about = "Master Sheetの構造を推定して数値を加算更新するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// `Key: Value` 形式の入力でセルを加算更新
    Update {
        /// 対象のExcelファイル（省略時は設定の default_file）
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 入力テキストファイル（省略時または `-` は標準入力）
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// バックアップを作成しない
        #[arg(long)]
        no_backup: bool,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 推定したシート構造を表示
    Inspect {
        /// 対象のExcelファイル
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話的に連続して更新
    Session {
        /// 対象のExcelファイル
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// バックアップを作成しない
        #[arg(long)]
        no_backup: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定の対象ファイルを設定
        #[arg(long)]
        set_default_file: Option<PathBuf>,

        /// 職種の略称を追加（例: SC=Sculptor）
        #[arg(long)]
        add_alias: Vec<String>,

        /// JSONファイルから職種の略称を取り込む（例: {"SC": "Sculptor"}）
        #[arg(long, value_name = "FILE")]
        import_aliases: Option<PathBuf>,

        /// 既定でバックアップを作成するか (on/off)
        #[arg(long)]
        backup: Option<Toggle>,
    },
}

/// on/off 指定
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

impl std::str::FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" | "true" | "yes" => Ok(Toggle::On),
            "off" | "false" | "no" => Ok(Toggle::Off),
            _ => Err(format!("Unknown value: {}. Use on or off", s)),
        }
    }
}
