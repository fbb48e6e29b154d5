//! 対話式の連続更新
//!
//! 1つのファイルに対して入力ブロックを繰り返し適用する。
//! 空行でブロックを確定し、構造キャッシュはセッション中使い回す。
//!
//! コマンド:
//! - `:file <path>` 対象ファイルを切り替える（キャッシュを破棄）
//! - `:backup on|off` バックアップの有無を切り替える
//! - `:quit` 終了

use crate::error::{Result, UpdaterError};
use crate::updater::Updater;
use dialoguer::Input;
use std::path::{Path, PathBuf};
use tracing::error;

/// セッション内のコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    SwitchFile(PathBuf),
    Backup(bool),
    Quit,
    Unknown(String),
}

/// `:` で始まる行をコマンドとして解釈（それ以外は None）
pub fn parse_command(line: &str) -> Option<SessionCommand> {
    let rest = line.trim().strip_prefix(':')?;
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match (name, arg) {
        ("quit" | "q", _) => SessionCommand::Quit,
        ("file", path) if !path.is_empty() => SessionCommand::SwitchFile(PathBuf::from(path)),
        ("backup", "on") => SessionCommand::Backup(true),
        ("backup", "off") => SessionCommand::Backup(false),
        _ => SessionCommand::Unknown(line.trim().to_string()),
    };
    Some(command)
}

/// 空行まで入力を読み、1ブロックにまとめる
fn read_block() -> Result<Option<String>> {
    let mut lines = Vec::new();
    loop {
        let prompt = if lines.is_empty() { "input" } else { "..." };
        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| UpdaterError::Io(std::io::Error::other(e.to_string())))?;

        if lines.is_empty() && line.trim_start().starts_with(':') {
            return Ok(Some(line));
        }
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }

    if lines.is_empty() {
        Ok(None)
    } else {
        Ok(Some(lines.join("\n")))
    }
}

/// 対話セッションを実行
pub fn run_session(updater: &mut Updater, file: &Path, backup: bool) -> Result<()> {
    let mut file = file.to_path_buf();
    let mut backup = backup;

    println!("📝 excel-updater - session");
    println!("target: {}", file.display());
    println!("Enter `Key: Value` lines, finish with an empty line.");
    println!("Commands: :file <path>  :backup on|off  :quit\n");

    loop {
        let block = match read_block()? {
            Some(block) => block,
            None => continue,
        };

        if let Some(command) = parse_command(&block) {
            match command {
                SessionCommand::Quit => break,
                SessionCommand::SwitchFile(path) => {
                    updater.clear_cache();
                    file = path;
                    println!("✔ target: {}", file.display());
                }
                SessionCommand::Backup(on) => {
                    backup = on;
                    println!("✔ backup: {}", if on { "on" } else { "off" });
                }
                SessionCommand::Unknown(text) => println!("⚠ unknown command: {}", text),
            }
            continue;
        }

        match updater.update_text(&file, &block, backup) {
            Ok(report) => {
                println!("{}", report.summary());
                for failure in report.failures() {
                    println!("✗ {}", failure.describe());
                }
                for warning in report.warnings() {
                    println!("⚠ {}", warning);
                }
            }
            Err(e) => {
                error!("Processing failed: {}", e);
                println!("✗ Processing failed: {}", e);
            }
        }
        println!();
    }

    Ok(())
}
