//! File watching for external changes
//!
//! The watcher only reports that the file changed; coalescing rapid change
//! bursts is the content updater's job, so there is exactly one debounce
//! point in the pipeline.

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use log::trace;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// File watcher that monitors a document for external changes
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<()>,
    watched_path: PathBuf,
}

impl FileWatcher {
    /// Create a new file watcher for the given path
    pub fn new(path: &Path) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let watched_path = path.to_path_buf();
        let watched_path_clone = watched_path.clone();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                // Only care about modification events
                if matches!(
                    event.kind,
                    notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                ) && event.paths.iter().any(|p| p == &watched_path_clone)
                {
                    let _ = tx.send(());
                }
            }
        })
        .context("Failed to create file watcher")?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch file: {}", path.display()))?;

        // Also watch the parent directory (for editors that use atomic rename)
        if let Some(parent) = path.parent() {
            watcher
                .watch(parent, RecursiveMode::NonRecursive)
                .context("Failed to watch parent directory")?;
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            watched_path,
        })
    }

    /// Drain pending change notifications. Returns true if at least one
    /// change arrived since the last call.
    pub fn try_changed(&self) -> bool {
        let mut changed = false;
        while self.receiver.try_recv().is_ok() {
            changed = true;
        }
        if changed {
            trace!("file changed on disk: {}", self.watched_path.display());
        }
        changed
    }

    /// Get the watched file path
    pub fn path(&self) -> &Path {
        &self.watched_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::thread;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_watcher_detects_changes() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "Initial content")?;
        file.flush()?;

        let watcher = FileWatcher::new(file.path())?;

        writeln!(file, "Modified content")?;
        file.flush()?;

        // Poll for event arrival (file system events can take time)
        let mut changed = false;
        for _ in 0..20 {
            thread::sleep(Duration::from_millis(100));
            if watcher.try_changed() {
                changed = true;
                break;
            }
        }

        assert!(changed, "watcher should report the modification");

        Ok(())
    }

    #[test]
    fn test_try_changed_drains_events() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "Initial content")?;
        file.flush()?;

        let watcher = FileWatcher::new(file.path())?;

        for i in 0..3 {
            writeln!(file, "Change {}", i)?;
            file.flush()?;
        }

        // Wait for the burst to arrive, then drain it
        thread::sleep(Duration::from_millis(500));
        let _ = watcher.try_changed();

        // With no further writes there is nothing left to report
        assert!(!watcher.try_changed());

        Ok(())
    }

    #[test]
    fn test_watcher_path() -> Result<()> {
        let file = NamedTempFile::new()?;
        let watcher = FileWatcher::new(file.path())?;

        assert_eq!(watcher.path(), file.path());

        Ok(())
    }
}
