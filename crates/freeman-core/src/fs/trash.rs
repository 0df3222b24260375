//! Freedesktop.org trash backend.
//!
//! Items sent to the trash are renamed into `<trash>/files/` under a
//! collision-free basename, with a matching record in `<trash>/info/`
//! holding the original path and deletion time — the layout desktop
//! environments read to offer "restore". Windows recycle-bin integration
//! is not implemented; the same layout is used on every platform.
//!
//! All functions here are blocking; the directory manager runs them on
//! `spawn_blocking` tasks.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::fs::wrapper::copy_any;

/// Extension of the metadata files under `info/`.
const TRASHINFO_EXTENSION: &str = "trashinfo";

/// Timestamp format required by the trash specification.
const TRASHINFO_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Returns the user trash directory: `$XDG_DATA_HOME/Trash`, falling back
/// to `~/.local/share/Trash`. `None` when no home directory can be
/// resolved (e.g. a bare daemon environment).
pub fn default_trash_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("Trash"))
}

/// Moves `path` into the trash rooted at `trash_dir`.
///
/// The item keeps its basename when free, otherwise `name.1`, `name.2`, …
/// is chosen. A same-filesystem rename is attempted first; across
/// filesystems the item is copied and the source deleted. If the move
/// fails the already-written info record is removed again.
///
/// # Errors
///
/// Any I/O failure while creating the trash layout, writing the info
/// record, or moving the item.
pub fn send_to_trash(path: &Path, trash_dir: &Path) -> io::Result<()> {
    let files_dir = trash_dir.join("files");
    let info_dir = trash_dir.join("info");
    std::fs::create_dir_all(&files_dir)?;
    std::fs::create_dir_all(&info_dir)?;

    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?
        .to_string_lossy()
        .into_owned();
    let basename = unique_basename(&files_dir, &info_dir, &name);

    let info_path = info_dir.join(format!("{basename}.{TRASHINFO_EXTENSION}"));
    write_trashinfo(&info_path, path)?;

    let target = files_dir.join(&basename);
    if let Err(err) = move_into(path, &target) {
        // Don't leave an orphaned record behind
        let _ = std::fs::remove_file(&info_path);
        return Err(err);
    }
    Ok(())
}

/// Picks a basename that collides with neither an existing trashed file
/// nor an existing info record.
fn unique_basename(files_dir: &Path, info_dir: &Path, name: &str) -> String {
    let mut candidate = name.to_string();
    let mut counter = 1u32;
    while files_dir.join(&candidate).exists()
        || info_dir
            .join(format!("{candidate}.{TRASHINFO_EXTENSION}"))
            .exists()
    {
        candidate = format!("{name}.{counter}");
        counter += 1;
    }
    candidate
}

fn write_trashinfo(info_path: &Path, original: &Path) -> io::Result<()> {
    let deleted_at = chrono::Local::now().format(TRASHINFO_TIME_FORMAT);
    let body = format!(
        "[Trash Info]\nPath={}\nDeletionDate={}\n",
        original.display(),
        deleted_at
    );
    // create_new: an existing record must never be clobbered
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(info_path)?;
    file.write_all(body.as_bytes())
}

fn move_into(src: &Path, target: &Path) -> io::Result<()> {
    match std::fs::rename(src, target) {
        Ok(()) => Ok(()),
        // Cross-device rename fails; fall back to copy + delete
        Err(_) => {
            copy_any(src, target)?;
            let meta = std::fs::symlink_metadata(src)?;
            if meta.is_dir() {
                std::fs::remove_dir_all(src)
            } else {
                std::fs::remove_file(src)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn trash_root(tmp: &TempDir) -> PathBuf {
        tmp.path().join("Trash")
    }

    #[test]
    fn trash_file_moves_it_under_files() {
        let tmp = TempDir::new().unwrap();
        let victim = tmp.path().join("doomed.txt");
        fs::write(&victim, "bye").unwrap();

        send_to_trash(&victim, &trash_root(&tmp)).unwrap();

        assert!(!victim.exists());
        let trashed = trash_root(&tmp).join("files").join("doomed.txt");
        assert_eq!(fs::read_to_string(&trashed).unwrap(), "bye");
    }

    #[test]
    fn trash_writes_matching_info_record() {
        let tmp = TempDir::new().unwrap();
        let victim = tmp.path().join("doomed.txt");
        fs::write(&victim, "bye").unwrap();

        send_to_trash(&victim, &trash_root(&tmp)).unwrap();

        let info = trash_root(&tmp).join("info").join("doomed.txt.trashinfo");
        let body = fs::read_to_string(&info).unwrap();
        assert!(body.starts_with("[Trash Info]\n"));
        assert!(body.contains(&format!("Path={}", victim.display())));
        assert!(body.contains("DeletionDate="));
    }

    #[test]
    fn trash_directory_keeps_contents() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("project");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("notes.md"), "draft").unwrap();

        send_to_trash(&dir, &trash_root(&tmp)).unwrap();

        assert!(!dir.exists());
        let trashed = trash_root(&tmp).join("files").join("project");
        assert_eq!(
            fs::read_to_string(trashed.join("notes.md")).unwrap(),
            "draft"
        );
    }

    #[test]
    fn trash_same_name_twice_picks_unique_basename() {
        let tmp = TempDir::new().unwrap();
        let root = trash_root(&tmp);

        let first = tmp.path().join("dup.txt");
        fs::write(&first, "one").unwrap();
        send_to_trash(&first, &root).unwrap();

        let second = tmp.path().join("dup.txt");
        fs::write(&second, "two").unwrap();
        send_to_trash(&second, &root).unwrap();

        let files = root.join("files");
        assert_eq!(fs::read_to_string(files.join("dup.txt")).unwrap(), "one");
        assert_eq!(fs::read_to_string(files.join("dup.txt.1")).unwrap(), "two");
        assert!(root.join("info").join("dup.txt.1.trashinfo").exists());
    }

    #[test]
    fn trash_nonexistent_path_fails_and_leaves_no_record() {
        let tmp = TempDir::new().unwrap();
        let root = trash_root(&tmp);

        let result = send_to_trash(&tmp.path().join("ghost.txt"), &root);

        assert!(result.is_err());
        assert!(!root.join("info").join("ghost.txt.trashinfo").exists());
    }

    #[test]
    fn unique_basename_counts_up() {
        let tmp = TempDir::new().unwrap();
        let files = tmp.path().join("files");
        let info = tmp.path().join("info");
        fs::create_dir_all(&files).unwrap();
        fs::create_dir_all(&info).unwrap();

        assert_eq!(unique_basename(&files, &info, "a.txt"), "a.txt");

        fs::write(files.join("a.txt"), "").unwrap();
        assert_eq!(unique_basename(&files, &info, "a.txt"), "a.txt.1");

        fs::write(files.join("a.txt.1"), "").unwrap();
        assert_eq!(unique_basename(&files, &info, "a.txt"), "a.txt.2");
    }

    #[test]
    fn unique_basename_respects_existing_info_records() {
        let tmp = TempDir::new().unwrap();
        let files = tmp.path().join("files");
        let info = tmp.path().join("info");
        fs::create_dir_all(&files).unwrap();
        fs::create_dir_all(&info).unwrap();

        // Only the info record exists (files/ slot is free)
        fs::write(info.join("a.txt.trashinfo"), "").unwrap();
        assert_eq!(unique_basename(&files, &info, "a.txt"), "a.txt.1");
    }
}
