//! Error types for `freeman-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Each variant captures the path(s) involved so the caller can display
/// a meaningful message or take corrective action. Batch operations
/// (delete, trash, copy, move) report the first failing item and make no
/// attempt to undo items that already completed.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to something else.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A file or directory name is invalid (empty, contains path separators, etc.).
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Enumerating the children of a directory failed.
    #[error("failed to list directory: {path}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating a file or directory failed.
    #[error("failed to create: {path}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Renaming failed; both full paths are kept for diagnostics.
    #[error("failed to rename {from} to {to}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Permanently deleting an item failed.
    #[error("failed to delete: {path}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Moving an item to the trash failed.
    #[error("failed to move to trash: {path}")]
    Trash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying an item failed; names both endpoints.
    #[error("failed to copy {src} to {dest}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Setting up a filesystem watch failed.
    #[error("failed to watch: {path}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Classifies a raw I/O error against the path that produced it.
    ///
    /// `NotFound` and `PermissionDenied` become their dedicated variants so
    /// callers can match on them; everything else stays a plain I/O error.
    pub(crate) fn classify(path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => {
                CoreError::PermissionDenied(path.to_path_buf())
            }
            _ => CoreError::Io(err),
        }
    }
}

/// Convenience alias used throughout `freeman-core`.
pub type CoreResult<T> = Result<T, CoreError>;
