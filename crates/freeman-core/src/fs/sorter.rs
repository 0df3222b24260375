//! Pure ordering functions for directory entries.
//!
//! All sorts are stable, deterministic, and idempotent, and return a new
//! `Vec` — the input slice is never mutated. Name comparison is
//! case-sensitive over NFC-normalised names (entries are normalised at
//! construction), so decomposed filenames collate consistently across
//! platforms.

use std::cmp::Ordering;

use crate::fs::entry::DirEntry;

/// Partitions directories before files, preserving input order within each
/// group.
pub fn sort_by_type(entries: &[DirEntry]) -> Vec<DirEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(compare_type);
    sorted
}

/// Orders entries by name alone.
pub fn sort_by_name(entries: &[DirEntry]) -> Vec<DirEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(compare_name);
    sorted
}

/// Directories first, then by name within each group. The default listing
/// order.
pub fn sort_by_type_then_name(entries: &[DirEntry]) -> Vec<DirEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| compare_type(a, b).then_with(|| compare_name(a, b)));
    sorted
}

fn compare_type(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.is_dir().cmp(&a.is_dir())
}

fn compare_name(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.name().cmp(b.name())
}
