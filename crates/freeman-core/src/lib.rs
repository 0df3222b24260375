//! FreeMAN core library — UI-agnostic directory management.
//!
//! `freeman-core` provides the filesystem layer a file-manager frontend
//! calls into: listing directories into typed entries, classifying and
//! sorting them, resolving hidden and inaccessible items across platforms,
//! and performing mutating operations (create, rename, delete, trash,
//! copy, move) with consistent error semantics and live change
//! notification. It is intentionally decoupled from any UI framework.
//!
//! # Modules
//!
//! - [`fs`] — The directory manager and its collaborators: raw primitives,
//!   attribute probe, sorters, trash backend, watcher.
//! - [`clipboard`] — Typed copy/cut state and its paste execution.
//! - [`config`] — TOML-based settings consumed by listings.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias
//!   ([`CoreResult`]).

pub mod clipboard;
pub mod config;
pub mod error;
pub mod fs;

pub use clipboard::{ClipboardAction, ClipboardState};
pub use config::{Config, GeneralConfig, WatcherConfig};
pub use error::{CoreError, CoreResult};
pub use fs::attributes::{AttributeError, AttributeProbe, NativeAttributes};
pub use fs::entry::DirEntry;
pub use fs::manager::{DirectoryManager, FilterFn, ItemKind, ListOptions, SortMode};
pub use fs::sorter::{sort_by_name, sort_by_type, sort_by_type_then_name};
pub use fs::trash::{default_trash_dir, send_to_trash};
pub use fs::wrapper::{FileSystemOps, TokioFileSystem};
