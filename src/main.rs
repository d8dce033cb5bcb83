//! Pivot console - a terminal client for the methodology engine
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::WrapErr;

use pivot_api::HttpEngineApi;
use pivot_app::config::{default_config_path, init_config_dir, load_settings};
use pivot_app::Engine;

/// Pivot console - a terminal client for the methodology engine
#[derive(Parser, Debug)]
#[command(name = "pivot")]
#[command(about = "A terminal console for the methodology engine", long_about = None)]
struct Args {
    /// Engine base URL (overrides `api.base_url`)
    #[arg(long, value_name = "URL")]
    api: Option<String>,

    /// Config file (default: ./.pivot/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run in headless mode (NDJSON output, no TUI)
    #[arg(long)]
    headless: bool,

    /// Write a default .pivot/config.toml in the current directory and exit
    #[arg(long, conflicts_with = "headless")]
    init_config: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let base_path = std::env::current_dir().wrap_err("Cannot read current directory")?;

    if args.init_config {
        let path = init_config_dir(&base_path)?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    pivot_core::logging::init()?;

    let config_path = args
        .config
        .unwrap_or_else(|| default_config_path(&base_path));
    let mut settings = load_settings(&config_path);
    if let Some(api) = args.api {
        settings.api.base_url = api;
    }

    let api = HttpEngineApi::new(&settings.api.base_url, settings.api.timeout())
        .wrap_err_with(|| format!("Invalid engine URL: {}", settings.api.base_url))?;
    let engine = Engine::new(Arc::new(api), settings);

    if args.headless {
        pivot_console::run_headless(engine).await?;
    } else {
        pivot_tui::run(engine).await?;
    }

    Ok(())
}
