mod config;
mod db;
mod errors;
mod ledger;
mod models;
mod report;
mod run;
mod stats;
mod ui;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let dirs = ProjectDirs::from("com", "monthbudget", "MonthBudget")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    init_logging(data_dir);

    let config = config::Config::load(&dirs.config_dir().join("config.toml"))?;
    let db_path = get_db_path(data_dir, &config)?;
    let mut db = db::Database::open(&db_path)?;
    tracing::info!(db = %db_path.display(), version = env!("CARGO_PKG_VERSION"), "starting");

    match args.len() {
        1 => run::as_tui(&mut db, &config),
        2.. => run::as_cli(&args, &mut db, &config),
        _ => {
            eprintln!("Usage: monthbudget [command]");
            Ok(())
        }
    }
}

/// Log to a file in the data directory; the TUI owns the terminal.
fn init_logging(data_dir: &Path) {
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("monthbudget.log"))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: logging disabled: {e}");
            return;
        }
    };

    let filter =
        EnvFilter::try_from_env("MONTHBUDGET_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// `MONTHBUDGET_DB`, then the config file, then the data directory.
fn get_db_path(data_dir: &Path, config: &config::Config) -> Result<PathBuf> {
    let path = match std::env::var_os("MONTHBUDGET_DB") {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => match &config.database {
            Some(p) => PathBuf::from(ui::util::shellexpand(&p.to_string_lossy())),
            None => data_dir.join("monthbudget.db"),
        },
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(path)
}
