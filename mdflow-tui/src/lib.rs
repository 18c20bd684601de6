//! mdflow TUI - terminal rendering pipeline and viewer
//!
//! This crate contains the incremental rendering core and the viewer built
//! on it:
//! - Node view cache (LRU over rendered blocks)
//! - Debounced streaming content updater
//! - Block rendering and cache-aware render dispatch
//! - Directive renderer registry
//! - Event loop, input handling, theme and status bar

pub mod app;
pub mod cache;
pub mod input;
pub mod registry;
pub mod render;
pub mod terminal;
pub mod theme;
pub mod ui;
pub mod updater;

#[cfg(feature = "watch")]
pub mod watcher;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use std::time::Duration;

// Re-export main types
pub use app::App;
pub use cache::{CacheKey, CacheStats, NodeViewCache};
pub use registry::{BlockRenderer, RendererRegistry};
pub use render::RenderOptions;
pub use updater::ContentUpdater;

/// Run the TUI application
pub fn run(mut app: App) -> Result<()> {
    let mut terminal = terminal::init().context("Failed to initialize terminal")?;

    // Main event loop
    let result = run_loop(&mut terminal, &mut app);

    // Always restore terminal, even if run_loop fails
    terminal::restore().context("Failed to restore terminal")?;

    result
}

fn run_loop(terminal: &mut terminal::Tui, app: &mut App) -> Result<()> {
    loop {
        // -1 for the status bar
        let viewport_height = terminal.size()?.height.saturating_sub(1) as usize;

        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("Failed to draw frame")?;

        if app.should_quit {
            break;
        }

        // Poll for events with timeout
        if crossterm::event::poll(Duration::from_millis(100)).context("Failed to poll events")? {
            if let Event::Key(key) = crossterm::event::read().context("Failed to read event")? {
                // Only handle key press events, ignore release
                if key.kind == KeyEventKind::Press {
                    input::handle_input(app, key, viewport_height);
                }
            }
        }

        // Route file changes into the debounced update pipeline
        #[cfg(feature = "watch")]
        if let Some(ref watcher) = app.watcher {
            if watcher.try_changed() {
                match std::fs::read_to_string(watcher.path()) {
                    Ok(text) => app.push_content(text),
                    // The file may be mid-rename; the next change event
                    // will pick it up
                    Err(e) => log::debug!("skipping unreadable change: {e}"),
                }
            }
        }

        // Apply settled content. Deliveries are full snapshots, so only the
        // newest one matters if several settled since the last tick.
        let mut latest = None;
        while let Some(text) = app.updater.try_recv_settled() {
            latest = Some(text);
        }
        if let Some(text) = latest {
            app.apply_settled(&text);
        }
    }

    Ok(())
}
