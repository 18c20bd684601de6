//! Renderer registry for fenced directive blocks
//!
//! Applications can register custom renderers for fenced code blocks by
//! info-string name (```mermaid, ```math, ...). The registry is an
//! explicitly constructed value owned by the composition root and passed
//! into render dispatch; there is no process-wide registry. Lookup is
//! case-insensitive and the last registration for a name wins.

use crate::theme::Theme;
use ratatui::text::Line;
use std::collections::HashMap;

/// Renders the body of a fenced block into styled lines
pub trait BlockRenderer {
    /// `source` is the fence body, without the opening and closing fence
    /// lines
    fn render(&self, source: &str, theme: &Theme) -> Vec<Line<'static>>;
}

/// Name-keyed registry of directive renderers
#[derive(Default)]
pub struct RendererRegistry {
    renderers: HashMap<String, Box<dyn BlockRenderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer under `name`. Names are matched
    /// case-insensitively; registering a name twice replaces the earlier
    /// renderer.
    pub fn register(&mut self, name: &str, renderer: Box<dyn BlockRenderer>) {
        self.renderers.insert(name.to_lowercase(), renderer);
    }

    /// Look up a renderer by fence info-string name
    pub fn get(&self, name: &str) -> Option<&dyn BlockRenderer> {
        self.renderers.get(&name.to_lowercase()).map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tagged(&'static str);

    impl BlockRenderer for Tagged {
        fn render(&self, source: &str, _theme: &Theme) -> Vec<Line<'static>> {
            vec![Line::raw(format!("{}:{}", self.0, source.trim_end()))]
        }
    }

    fn render_with(registry: &RendererRegistry, name: &str, source: &str) -> Option<String> {
        let theme = Theme::dark();
        registry
            .get(name)
            .map(|r| r.render(source, &theme)[0].spans[0].content.to_string())
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = RendererRegistry::new();
        assert!(registry.is_empty());

        registry.register("mermaid", Box::new(Tagged("m")));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            render_with(&registry, "mermaid", "graph").as_deref(),
            Some("m:graph")
        );
        assert!(registry.get("math").is_none());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut registry = RendererRegistry::new();
        registry.register("Mermaid", Box::new(Tagged("m")));

        assert!(registry.get("mermaid").is_some());
        assert!(registry.get("MERMAID").is_some());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = RendererRegistry::new();
        registry.register("math", Box::new(Tagged("old")));
        registry.register("MATH", Box::new(Tagged("new")));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            render_with(&registry, "math", "x^2").as_deref(),
            Some("new:x^2")
        );
    }
}
