//! Debounced directory watching.
//!
//! Uses [`notify`] with debouncing so a burst of filesystem events produces
//! a single callback. No diff is reported — consumers are expected to
//! re-list the directory from scratch.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify_debouncer_mini::{new_debouncer, DebouncedEventKind, Debouncer};

/// Default debounce window for change notification.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// A single non-recursive watch on one directory.
///
/// Dropping the watcher releases the underlying OS watch descriptor, so
/// replacing one watcher with another never leaks a registration.
pub(crate) struct DirectoryWatcher {
    // Held for its Drop impl, which tears down the notify backend.
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    path: PathBuf,
}

impl DirectoryWatcher {
    /// Starts watching `dir`, invoking `on_change` after each debounced
    /// burst of change events.
    pub(crate) fn start<F>(
        dir: &Path,
        debounce: Duration,
        on_change: F,
    ) -> Result<Self, notify::Error>
    where
        F: Fn() + Send + 'static,
    {
        let mut debouncer = new_debouncer(
            debounce,
            move |result: Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>| {
                match result {
                    Ok(events) => {
                        let has_change = events
                            .iter()
                            .any(|e| matches!(e.kind, DebouncedEventKind::Any));
                        if has_change {
                            on_change();
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "filesystem watch error");
                    }
                }
            },
        )?;

        // Non-recursive: only direct children matter for a pane listing
        debouncer
            .watcher()
            .watch(dir, notify::RecursiveMode::NonRecursive)?;

        Ok(Self {
            _debouncer: debouncer,
            path: dir.to_path_buf(),
        })
    }

    /// The directory this watcher is registered on.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}
