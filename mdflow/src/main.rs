//! mdflow - a live-preview TUI Markdown viewer with incremental rendering

use anyhow::{Context, Result};
use clap::Parser;
use mdflow_core::{Config, Document};
use mdflow_tui::{App, RendererRegistry};
use std::path::PathBuf;

/// A live-preview TUI Markdown viewer
#[derive(Parser, Debug)]
#[command(name = "mdflow")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to markdown file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Do not watch the file for changes
    #[cfg(feature = "watch")]
    #[arg(long)]
    no_watch: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Load document
    let doc = Document::load(&args.file)
        .with_context(|| format!("Failed to load document: {}", args.file.display()))?;

    // Create app; directive renderers would be registered here
    let mut app = App::new(config, doc, RendererRegistry::new())?;

    #[cfg(feature = "watch")]
    if app.config.watch.enabled && !args.no_watch {
        let watcher = mdflow_tui::watcher::FileWatcher::new(&args.file)
            .context("Failed to watch document")?;
        app.watcher = Some(watcher);
    }

    // Run TUI
    mdflow_tui::run(app).context("TUI application error")?;

    Ok(())
}
