//! Directory orchestration: listing, mutation, and change watching.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future;

use crate::config::settings::GeneralConfig;
use crate::error::{CoreError, CoreResult};
use crate::fs::attributes::AttributeProbe;
use crate::fs::entry::DirEntry;
use crate::fs::sorter;
use crate::fs::trash;
use crate::fs::watcher::{DirectoryWatcher, DEFAULT_DEBOUNCE};
use crate::fs::wrapper::FileSystemOps;

/// What [`DirectoryManager::create_item`] should create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// A zero-byte regular file.
    File,
    /// An empty directory.
    Directory,
}

/// Ordering applied to a listing before filtering.
#[derive(Debug, Clone, Copy)]
pub enum SortMode {
    /// Directories first, then by name. The default.
    TypeThenName,
    /// By name alone.
    Name,
    /// Directories first, ties keep enumeration order.
    Type,
    /// A caller-supplied total order.
    Custom(fn(&DirEntry, &DirEntry) -> std::cmp::Ordering),
}

/// Predicate deciding whether an entry survives a listing.
pub type FilterFn = Box<dyn Fn(&DirEntry) -> bool + Send + Sync>;

/// Configuration for a single [`DirectoryManager::list_directory`] call.
///
/// Sorting is applied before filtering, so a filter observing indices sees
/// a stable post-sort ordering.
pub struct ListOptions {
    /// Windows-only: additionally treat dot-prefixed names as hidden.
    /// Ignored on Unix (where dot-prefix is already the rule) and on
    /// platforms without hidden-file detection.
    pub hide_unix_style_hidden_items: bool,
    /// Ordering for the returned entries.
    pub sort: SortMode,
    /// Optional predicate; entries failing it are dropped after the sort.
    pub filter: Option<FilterFn>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            hide_unix_style_hidden_items: false,
            sort: SortMode::TypeThenName,
            filter: None,
        }
    }
}

impl ListOptions {
    /// Derives listing options from user settings: hidden entries are
    /// filtered out unless `show_hidden` is set, and directories lead
    /// unless `sort_dirs_first` is disabled.
    pub fn from_config(general: &GeneralConfig) -> Self {
        Self {
            hide_unix_style_hidden_items: general.hide_unix_style_hidden_items,
            sort: if general.sort_dirs_first {
                SortMode::TypeThenName
            } else {
                SortMode::Name
            },
            filter: if general.show_hidden {
                None
            } else {
                Some(Box::new(|entry: &DirEntry| !entry.is_hidden()))
            },
        }
    }
}

/// Orchestrates directory listings, mutations, and change watching.
///
/// Collaborators are constructor-injected so tests can substitute
/// in-memory fakes for the filesystem and the attribute store. The only
/// mutable state is the single watcher handle: one watched path per
/// manager, last writer wins.
pub struct DirectoryManager {
    fs: Arc<dyn FileSystemOps>,
    attributes: Arc<dyn AttributeProbe>,
    trash_dir: Option<PathBuf>,
    watch_debounce: Duration,
    watcher: Mutex<Option<DirectoryWatcher>>,
}

impl DirectoryManager {
    /// Creates a manager over the given collaborators.
    pub fn new(fs: Arc<dyn FileSystemOps>, attributes: Arc<dyn AttributeProbe>) -> Self {
        Self {
            fs,
            attributes,
            trash_dir: trash::default_trash_dir(),
            watch_debounce: DEFAULT_DEBOUNCE,
            watcher: Mutex::new(None),
        }
    }

    /// Creates a manager over the real filesystem and attribute store.
    pub fn native() -> Self {
        Self::new(
            Arc::new(crate::fs::wrapper::TokioFileSystem),
            Arc::new(crate::fs::attributes::NativeAttributes),
        )
    }

    /// Overrides the trash root. Used by tests and by frontends that
    /// manage per-volume trash directories.
    pub fn with_trash_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.trash_dir = Some(dir.into());
        self
    }

    /// Overrides the watch debounce window.
    pub fn with_watch_debounce(mut self, debounce: Duration) -> Self {
        self.watch_debounce = debounce;
        self
    }

    /// Reads the immediate contents of a directory.
    ///
    /// Per-child stat, access, and attribute lookups run concurrently and
    /// race in no particular order; the explicit sort step establishes the
    /// returned ordering. A child whose stat fails is still emitted, as a
    /// directory-classified entry with `accessible = false` — partial
    /// knowledge beats no listing. The call as a whole either returns all
    /// entries or fails; it never returns a partial set.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] / [`CoreError::PermissionDenied`] — the
    ///   target itself cannot be statted.
    /// - [`CoreError::NotADirectory`] — the target is not a directory.
    /// - [`CoreError::List`] — enumeration failed (permissions, or the
    ///   directory vanished between the stat and the read).
    pub async fn list_directory(
        &self,
        path: &Path,
        options: &ListOptions,
    ) -> CoreResult<Vec<DirEntry>> {
        let meta = self
            .fs
            .stat_entry(path)
            .await
            .map_err(|e| CoreError::classify(path, e))?;
        if !meta.is_dir() {
            return Err(CoreError::NotADirectory(path.to_path_buf()));
        }

        let names = self
            .fs
            .list_entries(path)
            .await
            .map_err(|source| CoreError::List {
                path: path.to_path_buf(),
                source,
            })?;

        let entries = future::join_all(
            names
                .iter()
                .map(|name| self.build_entry(path, name, options)),
        )
        .await;

        let sorted = match options.sort {
            SortMode::TypeThenName => sorter::sort_by_type_then_name(&entries),
            SortMode::Name => sorter::sort_by_name(&entries),
            SortMode::Type => sorter::sort_by_type(&entries),
            SortMode::Custom(cmp) => {
                let mut owned = entries;
                owned.sort_by(|a, b| cmp(a, b));
                owned
            }
        };

        Ok(match &options.filter {
            Some(filter) => sorted.into_iter().filter(|e| filter(e)).collect(),
            None => sorted,
        })
    }

    async fn build_entry(&self, parent: &Path, name: &str, options: &ListOptions) -> DirEntry {
        let path = parent.join(name);
        let is_hidden = self.resolve_hidden(&path, name, options).await;

        match self.fs.stat_entry(&path).await {
            Ok(metadata) => {
                let accessible = self.fs.check_read_access(&path).await.is_ok();
                DirEntry::from_metadata(path, name, &metadata, is_hidden, accessible)
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "child stat failed");
                DirEntry::unreadable(path, name, is_hidden)
            }
        }
    }

    async fn resolve_hidden(&self, path: &Path, name: &str, options: &ListOptions) -> bool {
        if cfg!(unix) {
            return name.starts_with('.');
        }
        if cfg!(windows) {
            return self.attribute_hidden(path, name, options).await;
        }
        // No hidden-file convention known for this platform
        false
    }

    /// Windows resolution: the opt-in dot-prefix convention first, then
    /// the native hidden bit. A failed attribute lookup degrades to "not
    /// hidden" so a listing never blocks on it.
    async fn attribute_hidden(&self, path: &Path, name: &str, options: &ListOptions) -> bool {
        if options.hide_unix_style_hidden_items && name.starts_with('.') {
            return true;
        }
        match self.attributes.is_hidden(path).await {
            Ok(hidden) => hidden,
            Err(err) => {
                tracing::warn!(error = %err, "attribute lookup failed, assuming not hidden");
                false
            }
        }
    }

    /// Creates an empty file or directory named `name` under `parent`.
    ///
    /// No pre-existence check is performed — collision handling is the
    /// caller's concern. Creating a file over an existing one truncates it.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidName`] — `name` is empty or contains path
    ///   separators.
    /// - [`CoreError::Create`] — the underlying filesystem call failed.
    pub async fn create_item(&self, name: &str, parent: &Path, kind: ItemKind) -> CoreResult<()> {
        if !is_valid_item_name(name) {
            return Err(CoreError::InvalidName(name.to_string()));
        }
        let path = parent.join(name);
        let result = match kind {
            ItemKind::Directory => self.fs.make_directory(&path).await,
            ItemKind::File => self.fs.write_empty_file(&path).await,
        };
        result.map_err(|source| CoreError::Create { path, source })
    }

    /// Renames `old_name` to `new_name` within `parent`.
    ///
    /// Returns immediately without touching the filesystem when the names
    /// are equal — some platforms error on renaming a path onto itself.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidName`] — `new_name` is not a valid file name.
    /// - [`CoreError::Rename`] — the rename failed; carries both paths.
    pub async fn rename_item(
        &self,
        old_name: &str,
        new_name: &str,
        parent: &Path,
    ) -> CoreResult<()> {
        if old_name == new_name {
            return Ok(());
        }
        if !is_valid_item_name(new_name) {
            return Err(CoreError::InvalidName(new_name.to_string()));
        }
        let from = parent.join(old_name);
        let to = parent.join(new_name);
        self.fs
            .rename(&from, &to)
            .await
            .map_err(|source| CoreError::Rename { from, to, source })
    }

    /// Permanently deletes the given entries, one concurrent removal per
    /// entry.
    ///
    /// Deletions are independent: a failure aborts nothing that already
    /// succeeded and rolls nothing back. The returned error names the
    /// first item that failed. An empty slice is a trivial success.
    pub async fn delete_items(&self, entries: &[DirEntry]) -> CoreResult<()> {
        future::join_all(entries.iter().map(|e| self.delete_entry(e)))
            .await
            .into_iter()
            .collect()
    }

    async fn delete_entry(&self, entry: &DirEntry) -> CoreResult<()> {
        let result = if entry.is_dir() {
            self.fs.remove_directory(entry.path()).await
        } else {
            self.fs.remove_file(entry.path()).await
        };
        result.map_err(|source| CoreError::Delete {
            path: entry.path().to_path_buf(),
            source,
        })
    }

    /// Moves the given entries to the trash, one concurrent move per
    /// entry. Same independence guarantees as [`delete_items`].
    ///
    /// [`delete_items`]: DirectoryManager::delete_items
    pub async fn trash_items(&self, entries: &[DirEntry]) -> CoreResult<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let Some(trash_dir) = self.trash_dir.clone() else {
            return Err(CoreError::Trash {
                path: entries[0].path().to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    "no trash directory available",
                ),
            });
        };
        future::join_all(entries.iter().map(|e| self.trash_entry(e, &trash_dir)))
            .await
            .into_iter()
            .collect()
    }

    async fn trash_entry(&self, entry: &DirEntry, trash_dir: &Path) -> CoreResult<()> {
        let src = entry.path().to_path_buf();
        let dir = trash_dir.to_path_buf();
        let result = tokio::task::spawn_blocking(move || trash::send_to_trash(&src, &dir))
            .await
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        result.map_err(|source| CoreError::Trash {
            path: entry.path().to_path_buf(),
            source,
        })
    }

    /// Copies each entry (directories recursively) into `destination`
    /// under its own basename, one concurrent copy per entry. No rollback
    /// of items that already completed.
    pub async fn copy_items(&self, entries: &[DirEntry], destination: &Path) -> CoreResult<()> {
        future::join_all(entries.iter().map(|e| self.copy_entry(e, destination)))
            .await
            .into_iter()
            .collect()
    }

    async fn copy_entry(&self, entry: &DirEntry, destination: &Path) -> CoreResult<()> {
        let target = destination.join(entry.name());
        self.fs
            .copy_recursive(entry.path(), &target)
            .await
            .map_err(|source| CoreError::Copy {
                src: entry.path().to_path_buf(),
                dest: target,
                source,
            })
    }

    /// Moves each entry into `destination` under its own basename, one
    /// concurrent move per entry.
    ///
    /// A same-filesystem rename is attempted first; only when that fails
    /// (typically across filesystems) does the move degrade to copy plus
    /// delete-source. A failure between those two steps can leave the item
    /// present at both ends; there is no compensation step.
    pub async fn move_items(&self, entries: &[DirEntry], destination: &Path) -> CoreResult<()> {
        future::join_all(entries.iter().map(|e| self.move_entry(e, destination)))
            .await
            .into_iter()
            .collect()
    }

    async fn move_entry(&self, entry: &DirEntry, destination: &Path) -> CoreResult<()> {
        let target = destination.join(entry.name());
        if self.fs.rename(entry.path(), &target).await.is_ok() {
            return Ok(());
        }
        self.copy_entry(entry, destination).await?;
        self.delete_entry(entry).await
    }

    /// Synchronously reads a UTF-8 text file.
    ///
    /// The one blocking escape hatch, for small configuration-style files
    /// only — directory content always goes through [`list_directory`].
    ///
    /// [`list_directory`]: DirectoryManager::list_directory
    pub fn read_file_sync(&self, path: &Path) -> CoreResult<String> {
        std::fs::read_to_string(path).map_err(|e| CoreError::classify(path, e))
    }

    /// Starts watching `path`, replacing any previous watch.
    ///
    /// At most one watch is active per manager; the previous watcher is
    /// dropped (releasing its OS descriptor) before the new one takes
    /// over. `on_change` fires after every debounced burst of events with
    /// no diff attached — re-list to observe the new state.
    ///
    /// # Errors
    ///
    /// [`CoreError::Watch`] when the OS watch cannot be registered; an
    /// existing watch is left untouched in that case.
    pub fn start_watching<F>(&self, path: &Path, on_change: F) -> CoreResult<()>
    where
        F: Fn() + Send + 'static,
    {
        let watcher = DirectoryWatcher::start(path, self.watch_debounce, on_change).map_err(
            |source| CoreError::Watch {
                path: path.to_path_buf(),
                source,
            },
        )?;
        *self.lock_watcher() = Some(watcher);
        Ok(())
    }

    /// Stops the active watch. Safe to call when nothing is watched.
    pub fn stop_watching(&self) {
        self.lock_watcher().take();
    }

    /// The directory currently being watched, if any.
    pub fn watched_path(&self) -> Option<PathBuf> {
        self.lock_watcher().as_ref().map(|w| w.path().to_path_buf())
    }

    fn lock_watcher(&self) -> std::sync::MutexGuard<'_, Option<DirectoryWatcher>> {
        // A poisoned lock only means a panic elsewhere; the Option inside
        // is still sound to use.
        self.watcher.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn is_valid_item_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if name.contains('/') || name.contains('\0') {
        return false;
    }
    #[cfg(windows)]
    if name.contains('\\') || name.contains(':') {
        return false;
    }
    true
}
