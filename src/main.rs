use anyhow::Context;
use clap::Parser;
use excel_updater::{cli, config, logging, session, updater};
use excel_updater::common::{column_letter, SheetStructure};
use cli::{Cli, Commands};
use config::Config;
use std::io::Read;
use std::path::Path;
use updater::Updater;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load().context("failed to load config")?;

    match cli.command {
        Commands::Update { file, input, no_backup, json } => {
            let file = file.unwrap_or_else(|| config.default_file.clone());
            let backup = config.create_backup && !no_backup;
            let text = read_input(input.as_deref())?;

            let mut updater = Updater::new(config);
            let report = updater
                .update_text(&file, &text, backup)
                .with_context(|| format!("Processing failed: {}", file.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                if let Some(path) = &report.backup {
                    println!("✔ backup: {}", path.display());
                }
                println!("{}", report.summary());
                for failure in report.failures() {
                    println!("✗ {}", failure.describe());
                }
                for warning in report.warnings() {
                    println!("⚠ {}", warning);
                }
            }
        }

        Commands::Inspect { file, json } => {
            let file = file.unwrap_or_else(|| config.default_file.clone());
            let mut updater = Updater::new(config);
            let structure = updater
                .structure(&file)
                .with_context(|| format!("Structure detection failed: {}", file.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&structure)?);
            } else {
                print_structure(&file, &structure);
            }
        }

        Commands::Session { file, no_backup } => {
            let file = file.unwrap_or_else(|| config.default_file.clone());
            let backup = config.create_backup && !no_backup;
            let mut updater = Updater::new(config);
            session::run_session(&mut updater, &file, backup)?;
        }

        Commands::Config { show, set_default_file, add_alias, import_aliases, backup } => {
            let mut config = config;
            let mut changed = false;

            if let Some(path) = set_default_file {
                config.default_file = path;
                changed = true;
            }
            if let Some(path) = import_aliases {
                let count = config
                    .import_aliases(&path)
                    .with_context(|| format!("failed to import aliases: {}", path.display()))?;
                println!("✔ imported {} aliases", count);
                changed = true;
            }
            for spec in &add_alias {
                config.add_alias(spec)?;
                changed = true;
            }
            if let Some(toggle) = backup {
                config.create_backup = toggle.is_on();
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ saved: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Config:");
                println!("  default file: {}", config.default_file.display());
                println!("  sheet: {}", config.sheet_name);
                println!("  backup: {}", if config.create_backup { "on" } else { "off" });
                println!("  cache ttl: {}s", config.cache_ttl_seconds);
                println!("  trade aliases:");
                for (abbr, name) in config.trade_aliases.iter() {
                    println!("    {} = {}", abbr, name);
                }
            }
        }
    }

    Ok(())
}

/// 入力テキストを読み込む（None または "-" は標準入力）
fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input: {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn print_structure(file: &Path, structure: &SheetStructure) {
    println!("📋 {}", file.display());
    println!(
        "  trade column: {} (from row {})",
        column_letter(structure.trade_column),
        structure.trade_start_row
    );
    if structure.header_groups.is_empty() {
        println!("  header groups: (none)");
        return;
    }
    println!("  header groups:");
    for (key, group) in structure.groups_by_column() {
        println!(
            "    {} <- \"{}\" [{}..{}]",
            key,
            group.original_label,
            column_letter(group.start_column),
            column_letter(group.end_column)
        );
        for sub in &group.sub_headers {
            println!("      {}: {}", column_letter(sub.column), sub.label);
        }
    }
}
