//! Document model with Rope-based text storage

use anyhow::{Context, Result};
use ropey::Rope;
use std::fs;
use std::path::{Path, PathBuf};

use crate::block::{self, Block};

/// The main document structure
#[derive(Clone)]
pub struct Document {
    /// Backing file, if the document was loaded from one
    pub path: Option<PathBuf>,
    pub rope: Rope,
    pub blocks: Vec<Block>,
    /// Bumped on every content change; lets consumers discard stale
    /// asynchronous results
    pub rev: u64,
}

impl Document {
    /// Load a document from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize path: {}", path.display()))?;

        let content = fs::read_to_string(&abs_path)
            .with_context(|| format!("Failed to read file: {}", abs_path.display()))?;

        let rope = Rope::from_str(&content);
        let blocks = block::parse_blocks(&content);

        Ok(Self {
            path: Some(abs_path),
            rope,
            blocks,
            rev: 1,
        })
    }

    /// Create a document from in-memory text (streaming sources have no
    /// backing file)
    pub fn from_text(text: &str) -> Self {
        Self {
            path: None,
            rope: Rope::from_str(text),
            blocks: block::parse_blocks(text),
            rev: 1,
        }
    }

    /// Reload the document from its backing file
    pub fn reload(&mut self) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("Document has no backing file to reload from")?;

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to reload file: {}", path.display()))?;

        self.rope = Rope::from_str(&content);
        self.blocks = block::parse_blocks(&content);
        self.rev += 1;

        Ok(())
    }

    /// Replace the document content wholesale. This is the streaming entry
    /// point: settled text from the update pipeline lands here.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.blocks = block::parse_blocks(text);
        self.rev += 1;
    }

    /// Full document text
    pub fn text(&self) -> String {
        self.rope.chunks().collect()
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"")?;

        let doc = Document::load(file.path())?;
        assert_eq!(doc.line_count(), 1); // Empty file has 1 line in Rope
        assert_eq!(doc.blocks.len(), 0);
        assert_eq!(doc.rev, 1);

        Ok(())
    }

    #[test]
    fn test_load_simple_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"# Heading\n\nSome text\n")?;

        let doc = Document::load(file.path())?;
        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].kind, BlockKind::Heading(1));
        assert_eq!(doc.blocks[1].kind, BlockKind::Paragraph);

        Ok(())
    }

    #[test]
    fn test_reload_increments_revision() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"Initial content\n")?;
        file.flush()?;

        let mut doc = Document::load(file.path())?;
        assert_eq!(doc.rev, 1);

        file.write_all(b"New content\n")?;
        file.flush()?;

        doc.reload()?;
        assert_eq!(doc.rev, 2);

        Ok(())
    }

    #[test]
    fn test_set_text_reparses_and_bumps_revision() {
        let mut doc = Document::from_text("One paragraph.\n");
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.rev, 1);

        doc.set_text("# Now a heading\n\nAnd a paragraph.\n");
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].kind, BlockKind::Heading(1));
        assert_eq!(doc.rev, 2);
    }

    #[test]
    fn test_from_text_has_no_path() {
        let mut doc = Document::from_text("text\n");
        assert!(doc.path.is_none());
        assert!(doc.reload().is_err());
    }

    #[test]
    fn test_text_round_trip() {
        let doc = Document::from_text("# A\n\nB\n");
        assert_eq!(doc.text(), "# A\n\nB\n");
    }
}
