// ==========================================
// 代课公告系统 - 命令行入口
// ==========================================
// 用途: 处理一份或多份代课文档并导出 CSV
// ==========================================

use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use suplovani::config::ConfigManager;
use suplovani::export::{CsvExporter, EntrySink};
use suplovani::{logging, BoardOrchestrator};
use tracing::{error, info};

/// Suplování: resolve and merge a school substitution export
#[derive(Parser, Debug)]
#[command(name = "suplovani")]
#[command(version, about, long_about = None)]
struct Args {
    /// Substitution documents (.json)
    #[arg(required = true)]
    documents: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Classes to include (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    include: Vec<String>,

    /// Classes to exclude (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Clear configured include/exclude lists before applying these
    #[arg(long)]
    clear: bool,

    /// Last period shown for the day
    #[arg(long)]
    day_end_hour: Option<u8>,

    /// Output folder (overrides configuration)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    info!(version = suplovani::VERSION, "代课公告系统启动");

    let config_path = ConfigManager::resolve_path(args.config.as_deref());
    let manager = ConfigManager::new(&config_path);
    let mut config = manager
        .load()
        .with_context(|| format!("无法加载配置: {}", config_path.display()))?;
    config.apply_overrides(args.clear, &args.include, &args.exclude, args.day_end_hour);
    config.validate().context("配置校验失败")?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_folder));
    let exporter = CsvExporter::new(&output);
    let orchestrator = BoardOrchestrator::new(Arc::new(config));

    let mut failed = 0usize;
    for (path, result) in orchestrator.process_batch(&args.documents) {
        let board = match result {
            Ok(board) => board,
            Err(e) => {
                error!(path = %path.display(), error = %e, "文档处理失败");
                failed += 1;
                continue;
            }
        };

        let date = board.date.unwrap_or_else(|| Local::now().date_naive());
        match exporter.write(&board, date) {
            Ok(files) => {
                for file in files {
                    info!(source = %path.display(), file = %file.display(), "已导出");
                }
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "导出失败");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} 份文档处理失败", failed);
    }
    Ok(())
}
