//! Raw filesystem primitives behind a mockable trait.
//!
//! [`FileSystemOps`] exposes every OS call the directory manager needs as an
//! independently-mockable async operation. It carries no business logic —
//! failures surface as plain [`std::io::Error`] values and the manager
//! decides how to classify them.

use std::io;
use std::path::Path;

use async_trait::async_trait;

/// Asynchronous access to raw filesystem primitives.
///
/// Implemented by [`TokioFileSystem`] for the real disk and by in-memory
/// fakes in tests, so the manager logic can be exercised without touching
/// the filesystem.
#[async_trait]
pub trait FileSystemOps: Send + Sync {
    /// Stats a path, following symlinks. A broken symlink therefore fails
    /// here, which the manager folds into an inaccessible entry.
    async fn stat_entry(&self, path: &Path) -> io::Result<std::fs::Metadata>;

    /// Returns the names of the immediate children of a directory.
    async fn list_entries(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Creates a single directory (parent must exist).
    async fn make_directory(&self, path: &Path) -> io::Result<()>;

    /// Writes a zero-byte file at the path, truncating any existing file.
    async fn write_empty_file(&self, path: &Path) -> io::Result<()>;

    /// Removes a directory and everything beneath it.
    async fn remove_directory(&self, path: &Path) -> io::Result<()>;

    /// Removes a single file or symlink.
    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Renames a path. Fails across filesystem boundaries.
    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Copies a file or directory tree to the destination path.
    async fn copy_recursive(&self, src: &Path, dest: &Path) -> io::Result<()>;

    /// Verifies the current process can read the path.
    async fn check_read_access(&self, path: &Path) -> io::Result<()>;
}

/// Production [`FileSystemOps`] backed by `tokio::fs`.
///
/// The recursive copy walks the tree with blocking `std::fs` calls on a
/// `spawn_blocking` task, since directory recursion does not map cleanly
/// onto async I/O.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioFileSystem;

#[async_trait]
impl FileSystemOps for TokioFileSystem {
    async fn stat_entry(&self, path: &Path) -> io::Result<std::fs::Metadata> {
        tokio::fs::metadata(path).await
    }

    async fn list_entries(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        let mut read_dir = tokio::fs::read_dir(path).await?;
        while let Some(child) = read_dir.next_entry().await? {
            names.push(child.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    async fn make_directory(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir(path).await
    }

    async fn write_empty_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::write(path, b"").await
    }

    async fn remove_directory(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_dir_all(path).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        tokio::fs::rename(from, to).await
    }

    async fn copy_recursive(&self, src: &Path, dest: &Path) -> io::Result<()> {
        let src = src.to_path_buf();
        let dest = dest.to_path_buf();
        tokio::task::spawn_blocking(move || copy_any(&src, &dest))
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
    }

    async fn check_read_access(&self, path: &Path) -> io::Result<()> {
        let meta = tokio::fs::metadata(path).await?;
        if meta.is_dir() {
            tokio::fs::read_dir(path).await.map(|_| ())
        } else {
            tokio::fs::File::open(path).await.map(|_| ())
        }
    }
}

/// Maximum recursion depth for the copy walk, to stop symlink loops.
const MAX_COPY_DEPTH: usize = 64;

pub(crate) fn copy_any(src: &Path, dest: &Path) -> io::Result<()> {
    let meta = std::fs::symlink_metadata(src)?;

    if meta.is_dir() {
        copy_dir_recursive(src, dest, 0)
    } else {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        copy_leaf(src, dest, meta.is_symlink())
    }
}

fn copy_dir_recursive(src: &Path, dest: &Path, depth: usize) -> io::Result<()> {
    if depth > MAX_COPY_DEPTH {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("maximum recursion depth ({MAX_COPY_DEPTH}) exceeded during copy"),
        ));
    }

    std::fs::create_dir_all(dest)?;

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let entry_path = entry.path();
        let target = dest.join(entry.file_name());

        // entry.file_type() does NOT follow symlinks
        let ft = entry.file_type()?;

        if ft.is_dir() {
            copy_dir_recursive(&entry_path, &target, depth + 1)?;
        } else {
            copy_leaf(&entry_path, &target, ft.is_symlink())?;
        }
    }

    Ok(())
}

fn copy_leaf(src: &Path, dest: &Path, is_symlink: bool) -> io::Result<()> {
    if !is_symlink {
        std::fs::copy(src, dest)?;
        return Ok(());
    }
    // Copy a symlink as a symlink rather than following it
    #[cfg(unix)]
    {
        let link_target = std::fs::read_link(src)?;
        std::os::unix::fs::symlink(&link_target, dest)
    }
    #[cfg(not(unix))]
    {
        std::fs::copy(src, dest).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn list_entries_returns_child_names() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        let names = TokioFileSystem.list_entries(tmp.path()).await.unwrap();

        assert_eq!(names.len(), 2);
        assert!(names.contains(&"a.txt".to_string()));
        assert!(names.contains(&"sub".to_string()));
    }

    #[tokio::test]
    async fn list_entries_nonexistent_fails() {
        let result = TokioFileSystem
            .list_entries(Path::new("/nonexistent/path/xyz"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn stat_entry_reports_directory() {
        let tmp = TempDir::new().unwrap();
        let meta = TokioFileSystem.stat_entry(tmp.path()).await.unwrap();
        assert!(meta.is_dir());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stat_entry_fails_on_broken_symlink() {
        let tmp = TempDir::new().unwrap();
        let link = tmp.path().join("dangling");
        std::os::unix::fs::symlink(tmp.path().join("missing"), &link).unwrap();

        assert!(TokioFileSystem.stat_entry(&link).await.is_err());
    }

    #[tokio::test]
    async fn write_empty_file_creates_zero_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.txt");

        TokioFileSystem.write_empty_file(&path).await.unwrap();

        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn make_directory_creates_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("newdir");

        TokioFileSystem.make_directory(&path).await.unwrap();

        assert!(path.is_dir());
    }

    #[tokio::test]
    async fn remove_directory_is_recursive() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("full");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("inner.txt"), "x").unwrap();

        TokioFileSystem.remove_directory(&dir).await.unwrap();

        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn copy_recursive_copies_tree() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.txt"), "aaa").unwrap();
        fs::create_dir(src.join("nested")).unwrap();
        fs::write(src.join("nested").join("b.txt"), "bbb").unwrap();

        let dest = tmp.path().join("dest");
        TokioFileSystem.copy_recursive(&src, &dest).await.unwrap();

        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "aaa");
        assert_eq!(
            fs::read_to_string(dest.join("nested").join("b.txt")).unwrap(),
            "bbb"
        );
        // Source untouched
        assert!(src.join("a.txt").exists());
    }

    #[tokio::test]
    async fn copy_recursive_single_file_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        fs::write(&src, "data").unwrap();

        let dest = tmp.path().join("deep").join("nested").join("dest.txt");
        TokioFileSystem.copy_recursive(&src, &dest).await.unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "data");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn copy_recursive_preserves_symlinks() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("real.txt"), "data").unwrap();
        std::os::unix::fs::symlink("real.txt", src.join("link.txt")).unwrap();

        let dest = tmp.path().join("dest");
        TokioFileSystem.copy_recursive(&src, &dest).await.unwrap();

        let copied = dest.join("link.txt");
        assert!(fs::symlink_metadata(&copied).unwrap().is_symlink());
    }

    #[tokio::test]
    async fn check_read_access_ok_for_readable_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("readable.txt");
        fs::write(&file, "x").unwrap();

        assert!(TokioFileSystem.check_read_access(&file).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn check_read_access_denied_for_unreadable_file() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("locked.txt");
        fs::write(&file, "x").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o000)).unwrap();

        let result = TokioFileSystem.check_read_access(&file).await;

        // Restore so TempDir can clean up
        fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();

        if nix_is_root() {
            // Root bypasses mode bits; nothing to assert
            return;
        }
        assert!(result.is_err());
    }

    #[cfg(unix)]
    fn nix_is_root() -> bool {
        // Geteuid without a libc dependency: root can read /etc/shadow
        std::fs::File::open("/etc/shadow").is_ok()
    }

    #[tokio::test]
    async fn rename_moves_file() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("old.txt");
        let to = tmp.path().join("new.txt");
        fs::write(&from, "content").unwrap();

        TokioFileSystem.rename(&from, &to).await.unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "content");
    }
}
