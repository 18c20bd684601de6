//! Application state

use crate::cache::NodeViewCache;
use crate::registry::RendererRegistry;
use crate::render::{self, RenderOptions};
use crate::updater::ContentUpdater;
use anyhow::{Context, Result};
use mdflow_core::config::ThemeVariant;
use mdflow_core::{Config, Document};
use ratatui::text::Line;
use std::num::NonZeroUsize;
use std::time::Duration;

#[cfg(feature = "watch")]
use crate::watcher::FileWatcher;

/// Main application state
pub struct App {
    pub config: Config,
    pub doc: Document,
    pub options: RenderOptions,
    pub cache: NodeViewCache,
    pub registry: RendererRegistry,
    pub updater: ContentUpdater,
    #[cfg(feature = "watch")]
    pub watcher: Option<FileWatcher>,

    pub rendered: Vec<Line<'static>>,
    pub scroll: usize,
    pub should_quit: bool,
}

impl App {
    /// Create a new application instance. The registry is taken as a
    /// parameter so callers can install directive renderers before the
    /// first render.
    pub fn new(config: Config, doc: Document, registry: RendererRegistry) -> Result<Self> {
        config.validate()?;
        let capacity = NonZeroUsize::new(config.render.cache_capacity)
            .context("render.cache_capacity must be at least 1")?;

        let options = RenderOptions::from_config(&config);
        let updater = ContentUpdater::spawn(Duration::from_millis(config.update.debounce_ms));

        let mut app = Self {
            config,
            doc,
            options,
            cache: NodeViewCache::new(capacity),
            registry,
            updater,
            #[cfg(feature = "watch")]
            watcher: None,
            rendered: Vec::new(),
            scroll: 0,
            should_quit: false,
        };
        app.render();
        Ok(app)
    }

    /// Re-render the document through the cache
    pub fn render(&mut self) {
        self.rendered =
            render::render_document(&self.doc, &self.options, &self.registry, &mut self.cache);
        let max = self.max_scroll();
        if self.scroll > max {
            self.scroll = max;
        }
    }

    /// Feed new content into the debounced update pipeline. The document is
    /// not touched until the content settles.
    pub fn push_content(&self, text: String) {
        self.updater.push(text);
    }

    /// Apply a settled streaming update
    pub fn apply_settled(&mut self, text: &str) {
        self.doc.set_text(text);
        self.render();
    }

    /// Re-read the backing file, bypassing the debounce pipeline
    pub fn reload_document(&mut self) -> Result<()> {
        self.doc.reload()?;
        self.render();
        Ok(())
    }

    /// Flip between dark and light. The options hash changes, so cached
    /// renderings for the old theme stop matching.
    pub fn toggle_theme(&mut self) {
        self.options.theme = match self.options.theme {
            ThemeVariant::Dark => ThemeVariant::Light,
            ThemeVariant::Light => ThemeVariant::Dark,
        };
        self.render();
    }

    /// Drop all cached renderings and re-render from scratch
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.render();
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll = (self.scroll + amount).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_sub(amount);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn max_scroll(&self) -> usize {
        self.rendered.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_app(text: &str) -> App {
        let doc = Document::from_text(text);
        App::new(Config::default(), doc, RendererRegistry::new()).unwrap()
    }

    #[test]
    fn test_new_renders_immediately() {
        let app = new_app("# Title\n\nBody.\n");
        assert!(!app.rendered.is_empty());
        assert_eq!(app.cache.stats().misses, 2);
    }

    #[test]
    fn test_zero_capacity_config_rejected() {
        let mut config = Config::default();
        config.render.cache_capacity = 0;
        let doc = Document::from_text("x\n");
        assert!(App::new(config, doc, RendererRegistry::new()).is_err());
    }

    #[test]
    fn test_apply_settled_bumps_revision_and_rerenders() {
        let mut app = new_app("Old.\n");
        let before = app.doc.rev;

        app.apply_settled("New content.\n");
        assert_eq!(app.doc.rev, before + 1);
        assert!(!app.rendered.is_empty());
    }

    #[test]
    fn test_toggle_theme_changes_options() {
        let mut app = new_app("Body.\n");
        let before = app.options.config_hash();
        app.toggle_theme();
        assert_ne!(app.options.config_hash(), before);
    }

    #[test]
    fn test_clear_cache_resets_stats() {
        let mut app = new_app("# A\n\nB.\n");
        app.render();
        assert!(app.cache.stats().hits > 0);

        app.clear_cache();
        // clear() zeroes the counters, then the re-render misses once per block
        let stats = app.cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 2);
    }

    #[test]
    fn test_scroll_clamps() {
        let mut app = new_app("One.\n\nTwo.\n\nThree.\n");
        app.scroll_down(1000);
        assert!(app.scroll < app.rendered.len());
        app.scroll_up(1000);
        assert_eq!(app.scroll, 0);
        app.scroll_to_bottom();
        assert_eq!(app.scroll, app.rendered.len() - 1);
        app.scroll_to_top();
        assert_eq!(app.scroll, 0);
    }
}
