//! Platform hidden-attribute resolution.
//!
//! On Windows, hidden status is a file attribute rather than a naming
//! convention. [`AttributeProbe`] abstracts the attribute store behind a
//! mockable trait; [`NativeAttributes`] queries the real one.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// The native attribute store could not be queried for a path.
///
/// Non-fatal by contract: hidden-status resolution swallows this and
/// assumes "not hidden" so a listing never fails on an attribute lookup.
#[derive(Debug, thiserror::Error)]
#[error("failed to read attributes: {path}")]
pub struct AttributeError {
    /// The path whose attributes could not be resolved.
    pub path: PathBuf,
    #[source]
    source: std::io::Error,
}

impl AttributeError {
    pub(crate) fn new(path: &Path, source: std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read access to the platform's per-file attribute store.
#[async_trait]
pub trait AttributeProbe: Send + Sync {
    /// Whether the attribute store marks the path as hidden.
    async fn is_hidden(&self, path: &Path) -> Result<bool, AttributeError>;
}

/// Queries the real attribute store.
///
/// On Windows this reads the `FILE_ATTRIBUTE_HIDDEN` bit. Platforms without
/// an attribute store always report `false` — dot-prefix detection is
/// handled by the directory manager, not here.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeAttributes;

#[async_trait]
impl AttributeProbe for NativeAttributes {
    #[cfg(windows)]
    async fn is_hidden(&self, path: &Path) -> Result<bool, AttributeError> {
        use std::os::windows::fs::MetadataExt;

        const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| AttributeError::new(path, source))?;
        Ok(metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
    }

    #[cfg(not(windows))]
    async fn is_hidden(&self, _path: &Path) -> Result<bool, AttributeError> {
        Ok(false)
    }
}
