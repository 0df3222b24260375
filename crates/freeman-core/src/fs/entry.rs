//! Directory entry representation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use unicode_normalization::UnicodeNormalization;

/// A single filesystem object surfaced by a directory listing.
///
/// `DirEntry` is an immutable value object — every [`list_directory`] call
/// constructs fresh entries, and an entry has no identity beyond its `path`
/// within that call. Entries are never persisted.
///
/// An entry whose stat failed (broken symlink, permission-denied lookup) is
/// still surfaced: it reports `is_dir = true` so a frontend can offer a
/// drill-in affordance, `accessible = false`, and carries no size or
/// modification time.
///
/// [`list_directory`]: crate::fs::manager::DirectoryManager::list_directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    path: PathBuf,
    name: String,
    is_dir: bool,
    is_hidden: bool,
    accessible: bool,
    size: Option<u64>,
    modified: Option<SystemTime>,
}

impl DirEntry {
    /// Creates an entry from a successful stat result.
    ///
    /// `size` is reported only for accessible non-directories, and
    /// `modified` only for accessible entries. The name is normalised to
    /// NFC so decomposed filenames (macOS) compare and sort consistently.
    pub fn from_metadata(
        path: PathBuf,
        name: &str,
        metadata: &std::fs::Metadata,
        is_hidden: bool,
        accessible: bool,
    ) -> Self {
        let is_dir = metadata.is_dir();
        Self {
            path,
            name: name.nfc().collect(),
            is_dir,
            is_hidden,
            accessible,
            size: if is_dir || !accessible {
                None
            } else {
                Some(metadata.len())
            },
            modified: if accessible {
                metadata.modified().ok()
            } else {
                None
            },
        }
    }

    /// Creates an entry for a child whose stat failed.
    ///
    /// `is_dir` defaults to `true` as a best-effort classification.
    pub fn unreadable(path: PathBuf, name: &str, is_hidden: bool) -> Self {
        Self {
            path,
            name: name.nfc().collect(),
            is_dir: true,
            is_hidden,
            accessible: false,
            size: None,
            modified: None,
        }
    }

    /// Returns the full path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the entry name (last component of the path), NFC-normalised.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this entry is a directory.
    ///
    /// Entries whose stat failed report `true` here.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if the entry is hidden on the current platform.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Returns `true` if the current process has at least read permission.
    pub fn accessible(&self) -> bool {
        self.accessible
    }

    /// Returns the size in bytes. `None` for directories and inaccessible
    /// entries.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Returns the last-modified time, if the entry could be statted and
    /// read.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }
}
