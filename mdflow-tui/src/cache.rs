//! Node view cache
//!
//! Memoizes the mapping from (block content, render configuration) to the
//! styled lines that block rendered to. Bounded LRU: when the store grows
//! past capacity the least-recently-touched entry is dropped. During a
//! streaming update only the blocks that actually changed are re-rendered;
//! everything else is a cache hit.

use log::debug;
use lru::LruCache;
use mdflow_core::Block;
use ratatui::text::Line;
use std::num::NonZeroUsize;

/// Key for one cached block rendering
#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub struct CacheKey {
    /// Structural content hash of the block
    pub content: u64,
    /// Hash of the render options the block was rendered under
    pub config: u64,
}

impl CacheKey {
    pub fn new(block: &Block, config_hash: u64) -> Self {
        Self {
            content: block.content_hash(),
            config: config_hash,
        }
    }
}

/// Hit/miss counters, exposed for the status bar and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups that were hits; 0.0 before any lookup
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// LRU cache for rendered blocks
pub struct NodeViewCache {
    cache: LruCache<CacheKey, Vec<Line<'static>>>,
    hits: u64,
    misses: u64,
}

impl NodeViewCache {
    /// Create a cache holding at most `capacity` rendered blocks
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a block's rendered lines. A hit refreshes the entry's
    /// recency; a miss only counts, it never evicts.
    pub fn get(&mut self, key: &CacheKey) -> Option<Vec<Line<'static>>> {
        match self.cache.get(key) {
            Some(lines) => {
                self.hits += 1;
                Some(lines.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store rendered lines for a block, marking the entry most recently
    /// used. Inserting past capacity drops the least-recently-used entry;
    /// overwriting an existing key does not change the entry count.
    pub fn insert(&mut self, key: CacheKey, lines: Vec<Line<'static>>) {
        if self.cache.len() == self.cache.cap().get() && !self.cache.contains(&key) {
            debug!("node view cache full ({}), evicting LRU entry", self.cache.len());
        }
        self.cache.put(key, lines);
    }

    /// Drop every entry and reset the hit/miss counters
    pub fn clear(&mut self) {
        debug!(
            "clearing node view cache: {} entries, {} hits / {} misses",
            self.cache.len(),
            self.hits,
            self.misses
        );
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.cache.len(),
            capacity: self.capacity(),
        }
    }

    /// Human-readable one-line summary for the status bar. Diagnostic only,
    /// not a stable format.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "cache {}/{} hit {:.0}% ({}h/{}m)",
            stats.len,
            stats.capacity,
            stats.hit_rate() * 100.0,
            stats.hits,
            stats.misses
        )
    }
}
