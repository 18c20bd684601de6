//! mdflow core - Document model, block parsing, and configuration
//!
//! This crate contains the core logic for mdflow, independent of terminal UI
//! concerns:
//! - Block-level Markdown model with stable content hashing
//! - Document model with Rope-based text storage
//! - Configuration management

pub mod block;
pub mod config;
pub mod doc;

// Re-export commonly used types
pub use block::{Block, BlockKind};
pub use config::Config;
pub use doc::Document;
