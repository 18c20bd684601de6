//! Block rendering and cache-aware dispatch
//!
//! `render_document` walks a document's blocks and asks the node view cache
//! for each one before rendering it. The cache key combines the block's
//! structural content hash with the hash of the active `RenderOptions`, so
//! a settled streaming update re-renders only the blocks whose source
//! changed, and an options change (theme toggle) misses cleanly instead of
//! serving stale styles.

use crate::cache::{CacheKey, NodeViewCache};
use crate::registry::RendererRegistry;
use crate::theme::Theme;
use mdflow_core::block::{self, Block, BlockKind};
use mdflow_core::config::{Config, ThemeVariant};
use mdflow_core::Document;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use unicode_width::UnicodeWidthStr;

const RULE_WIDTH: usize = 40;

/// Everything that affects how a block renders. Hashed into the cache key:
/// two option values that hash equal must render every block identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderOptions {
    pub theme: ThemeVariant,
    /// Leading spaces for code block lines
    pub code_indent: u8,
    /// Marker for unordered list items
    pub bullet: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::Dark,
            code_indent: 4,
            bullet: '•',
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            theme: config.theme,
            ..Default::default()
        }
    }

    /// Configuration hash for cache keying
    pub fn config_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// Render a whole document, reusing cached block renderings where the
/// block's content and the options are unchanged. Blocks are separated by
/// one blank line.
pub fn render_document(
    doc: &Document,
    options: &RenderOptions,
    registry: &RendererRegistry,
    cache: &mut NodeViewCache,
) -> Vec<Line<'static>> {
    let config_hash = options.config_hash();
    let theme = Theme::for_variant(options.theme);
    let mut out = Vec::new();

    for (i, block) in doc.blocks.iter().enumerate() {
        if i > 0 {
            out.push(Line::default());
        }

        let key = CacheKey::new(block, config_hash);
        let lines = match cache.get(&key) {
            Some(lines) => lines,
            None => {
                let lines = render_block(block, options, &theme, registry);
                cache.insert(key, lines.clone());
                lines
            }
        };
        out.extend(lines);
    }

    out
}

/// Render one block into styled lines
pub fn render_block(
    block: &Block,
    options: &RenderOptions,
    theme: &Theme,
    registry: &RendererRegistry,
) -> Vec<Line<'static>> {
    if let BlockKind::CodeFence { info } = &block.kind {
        if !info.is_empty() {
            if let Some(renderer) = registry.get(info) {
                return renderer.render(&fence_body(&block.raw), theme);
            }
        }
    }

    match block.kind {
        BlockKind::Rule => vec![Line::from(Span::styled(
            "─".repeat(RULE_WIDTH),
            theme.rule,
        ))],
        BlockKind::Html | BlockKind::Other => block
            .raw
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), theme.code_block)))
            .collect(),
        _ => MarkdownWriter::new(options, theme).render(&block.raw),
    }
}

/// Strip the opening and closing fence lines from a fenced block's raw
/// source, leaving the body
fn fence_body(raw: &str) -> String {
    let mut lines: Vec<&str> = raw.lines().collect();
    if !lines.is_empty() {
        lines.remove(0);
    }
    if let Some(last) = lines.last() {
        let trimmed = last.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            lines.pop();
        }
    }
    let mut body = lines.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    body
}

/// Event-walking renderer for a single block's Markdown source
struct MarkdownWriter<'a> {
    options: &'a RenderOptions,
    theme: &'a Theme,

    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,

    bold: bool,
    italic: bool,
    strike: bool,
    link: bool,
    heading_level: Option<u8>,
    in_code_block: bool,
    quote_depth: usize,

    // Ordered item counter per nesting level, None for bullet lists
    list_stack: Vec<Option<u64>>,

    table_rows: Vec<Vec<String>>,
    table_cell: Option<String>,
}

impl<'a> MarkdownWriter<'a> {
    fn new(options: &'a RenderOptions, theme: &'a Theme) -> Self {
        Self {
            options,
            theme,
            lines: Vec::new(),
            spans: Vec::new(),
            bold: false,
            italic: false,
            strike: false,
            link: false,
            heading_level: None,
            in_code_block: false,
            quote_depth: 0,
            list_stack: Vec::new(),
            table_rows: Vec::new(),
            table_cell: None,
        }
    }

    fn render(mut self, source: &str) -> Vec<Line<'static>> {
        for event in Parser::new_ext(source, block::parser_options()) {
            match event {
                Event::Start(tag) => self.start(tag),
                Event::End(tag) => self.end(tag),
                Event::Text(text) => self.text(&text),
                Event::Code(text) => {
                    if let Some(cell) = self.table_cell.as_mut() {
                        cell.push_str(&text);
                    } else {
                        self.push_span(text.to_string(), self.theme.code);
                    }
                }
                Event::SoftBreak => self.push_span(" ".to_string(), self.current_style()),
                Event::HardBreak => self.flush_line(),
                Event::TaskListMarker(checked) => {
                    let marker = if checked { "[x] " } else { "[ ] " };
                    self.push_span(marker.to_string(), self.theme.list_marker);
                }
                Event::Html(html) | Event::InlineHtml(html) => {
                    self.push_span(html.trim_end().to_string(), self.theme.code_block);
                }
                _ => {}
            }
        }

        self.flush_line();
        self.lines
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => self.heading_level = Some(level as u8),
            Tag::CodeBlock(_) => self.in_code_block = true,
            Tag::Strong => self.bold = true,
            Tag::Emphasis => self.italic = true,
            Tag::Strikethrough => self.strike = true,
            Tag::Link { .. } => self.link = true,
            Tag::BlockQuote(_) => self.quote_depth += 1,
            Tag::List(start) => self.list_stack.push(start),
            Tag::Item => {
                self.flush_line();
                let indent = "  ".repeat(self.list_stack.len().saturating_sub(1));
                let marker = match self.list_stack.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}{}. ", indent, n);
                        *n += 1;
                        marker
                    }
                    _ => format!("{}{} ", indent, self.options.bullet),
                };
                self.push_span(marker, self.theme.list_marker);
            }
            Tag::Table(_) => self.table_rows.clear(),
            Tag::TableHead | Tag::TableRow => self.table_rows.push(Vec::new()),
            Tag::TableCell => self.table_cell = Some(String::new()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.flush_line();
                self.heading_level = None;
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
            }
            TagEnd::Strong => self.bold = false,
            TagEnd::Emphasis => self.italic = false,
            TagEnd::Strikethrough => self.strike = false,
            TagEnd::Link => self.link = false,
            TagEnd::BlockQuote(_) => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.list_stack.pop();
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::Paragraph => self.flush_line(),
            TagEnd::TableCell => {
                if let (Some(cell), Some(row)) = (self.table_cell.take(), self.table_rows.last_mut())
                {
                    row.push(cell);
                }
            }
            TagEnd::Table => self.emit_table(),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(cell) = self.table_cell.as_mut() {
            cell.push_str(text);
            return;
        }

        if self.in_code_block {
            let indent = " ".repeat(self.options.code_indent as usize);
            for line in text.lines() {
                self.lines.push(Line::from(Span::styled(
                    format!("{}{}", indent, line),
                    self.theme.code_block,
                )));
            }
            return;
        }

        self.push_span(text.to_string(), self.current_style());
    }

    fn current_style(&self) -> Style {
        if self.link {
            return self.theme.link;
        }

        let mut style = match self.heading_level {
            Some(level) => self.theme.heading[(level as usize - 1).min(5)],
            None if self.quote_depth > 0 => self.theme.quote,
            None => self.theme.base,
        };
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.strike {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        style
    }

    fn push_span(&mut self, content: String, style: Style) {
        if self.spans.is_empty() && self.quote_depth > 0 {
            self.spans.push(Span::styled(
                "▌ ".repeat(self.quote_depth),
                self.theme.quote_marker,
            ));
        }
        self.spans.push(Span::styled(content, style));
    }

    fn flush_line(&mut self) {
        if !self.spans.is_empty() {
            let spans = std::mem::take(&mut self.spans);
            self.lines.push(Line::from(spans));
        }
    }

    /// Lay out buffered table rows with unicode-aware column widths. The
    /// first buffered row is the header.
    fn emit_table(&mut self) {
        let rows = std::mem::take(&mut self.table_rows);
        if rows.is_empty() {
            return;
        }

        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(UnicodeWidthStr::width(cell.as_str()));
            }
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let style = if row_idx == 0 {
                self.theme.table_header
            } else {
                self.theme.base
            };

            let mut spans = Vec::new();
            for (i, width) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = width.saturating_sub(UnicodeWidthStr::width(cell));
                spans.push(Span::styled("│ ".to_string(), self.theme.table_border));
                spans.push(Span::styled(
                    format!("{}{} ", cell, " ".repeat(pad)),
                    style,
                ));
            }
            spans.push(Span::styled("│".to_string(), self.theme.table_border));
            self.lines.push(Line::from(spans));

            if row_idx == 0 {
                let mut sep = Vec::new();
                for width in &widths {
                    sep.push(Span::styled(
                        format!("├─{}─", "─".repeat(*width)),
                        self.theme.table_border,
                    ));
                }
                sep.push(Span::styled("┤".to_string(), self.theme.table_border));
                self.lines.push(Line::from(sep));
            }
        }
    }
}
