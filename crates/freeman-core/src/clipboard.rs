//! Clipboard execution bridge.
//!
//! The clipboard itself is owned by the frontend — it decides when items
//! are marked and when a paste happens. This module supplies the typed
//! state and routes the paste to the manager's copy or move engine.

use std::path::Path;

use crate::error::CoreResult;
use crate::fs::entry::DirEntry;
use crate::fs::manager::DirectoryManager;

/// What a paste should do with the held items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardAction {
    /// Duplicate the items into the destination.
    Copy,
    /// Relocate the items into the destination.
    Cut,
}

/// Items marked for a pending copy or cut.
#[derive(Debug, Clone)]
pub struct ClipboardState {
    items: Vec<DirEntry>,
    action: ClipboardAction,
}

impl ClipboardState {
    /// Captures the given entries for a later paste.
    pub fn new(items: Vec<DirEntry>, action: ClipboardAction) -> Self {
        Self { items, action }
    }

    /// The held entries.
    pub fn items(&self) -> &[DirEntry] {
        &self.items
    }

    /// The pending action.
    pub fn action(&self) -> ClipboardAction {
        self.action
    }

    /// `true` when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Executes the pending action into `destination`.
    ///
    /// `Copy` duplicates the items; `Cut` moves them. The clipboard state
    /// itself is not consumed — clearing after a successful cut-paste is
    /// the frontend's call.
    pub async fn paste(
        &self,
        manager: &DirectoryManager,
        destination: &Path,
    ) -> CoreResult<()> {
        match self.action {
            ClipboardAction::Copy => manager.copy_items(&self.items, destination).await,
            ClipboardAction::Cut => manager.move_items(&self.items, destination).await,
        }
    }
}
