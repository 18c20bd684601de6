//! Block-level Markdown model
//!
//! A document is split into top-level blocks (headings, paragraphs, fenced
//! code, lists, quotes, tables, rules). Each block keeps the raw source slice
//! it was parsed from, which is what the render cache hashes: two blocks with
//! the same kind and the same source render identically, regardless of where
//! in the document they sit.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Kind of a top-level block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    /// Fenced or indented code. `info` is the first word of the fence info
    /// string ("rust" for ```` ```rust ````), empty for indented code.
    CodeFence { info: String },
    List { ordered: bool },
    BlockQuote,
    Table,
    Rule,
    Html,
    /// Anything else pulldown-cmark produces at the top level
    /// (footnote definitions, metadata blocks)
    Other,
}

/// One top-level block of a parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Raw source text of the block, exactly as sliced from the document
    pub raw: String,
    /// Zero-based line of the block's first source line
    pub source_line: usize,
}

impl Block {
    /// Structural content hash: stable across re-parses as long as the
    /// block's kind and source are unchanged. The source position is
    /// deliberately excluded so that edits elsewhere in the document do not
    /// invalidate this block's cached rendering.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.kind.hash(&mut hasher);
        self.raw.hash(&mut hasher);
        hasher.finish()
    }
}

/// Parser extensions used everywhere a block's source is (re)parsed
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

fn kind_for_tag(tag: &Tag<'_>) -> BlockKind {
    match tag {
        Tag::Heading { level, .. } => BlockKind::Heading(*level as u8),
        Tag::Paragraph => BlockKind::Paragraph,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => BlockKind::CodeFence {
            info: info
                .split([' ', ',', '\t'])
                .next()
                .unwrap_or("")
                .to_string(),
        },
        Tag::CodeBlock(CodeBlockKind::Indented) => BlockKind::CodeFence {
            info: String::new(),
        },
        Tag::List(start) => BlockKind::List {
            ordered: start.is_some(),
        },
        Tag::BlockQuote(_) => BlockKind::BlockQuote,
        Tag::Table(_) => BlockKind::Table,
        Tag::HtmlBlock => BlockKind::Html,
        _ => BlockKind::Other,
    }
}

/// Split Markdown source into top-level blocks.
///
/// Nested structure (list items, emphasis, table cells) stays inside the
/// enclosing block's raw text; re-rendering a block re-parses just that
/// slice.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut kind = BlockKind::Paragraph;

    // Block starts arrive in document order, so source lines can be counted
    // incrementally in a single pass over the text.
    let mut scanned = 0usize;
    let mut line = 0usize;

    for (event, range) in Parser::new_ext(text, parser_options()).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    start = range.start;
                    kind = kind_for_tag(&tag);
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    line += text[scanned..start].matches('\n').count();
                    scanned = start;
                    blocks.push(Block {
                        kind: kind.clone(),
                        raw: text[start..range.end].to_string(),
                        source_line: line,
                    });
                }
            }
            Event::Rule if depth == 0 => {
                line += text[scanned..range.start].matches('\n').count();
                scanned = range.start;
                blocks.push(Block {
                    kind: BlockKind::Rule,
                    raw: text[range.start..range.end].to_string(),
                    source_line: line,
                });
            }
            _ => {}
        }
    }

    blocks
}
