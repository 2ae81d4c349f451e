//! File artifacts
//!
//! An [`AssetFile`] pairs a canonical relative path with serialized bytes.
//! Assets keep them in memory; writing to disk is the caller's business.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AssetError;
use crate::hash::ContentHash;

/// Persisted (or persistable) asset output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    filename: PathBuf,
    data: Vec<u8>,
}

impl AssetFile {
    /// Create a file artifact
    #[inline]
    #[must_use]
    pub fn new(filename: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }

    /// Canonical relative path
    #[inline]
    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Serialized content
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Blake3 digest of the content
    #[inline]
    #[must_use]
    pub fn hash(&self) -> ContentHash {
        ContentHash::compute(&self.data)
    }

    /// Write the file under `dir`, creating parent directories
    ///
    /// Returns the absolute-or-relative path actually written.
    ///
    /// # Errors
    /// Returns [`AssetError::Persist`] if a directory or the file cannot be written
    pub fn persist(&self, dir: &Path) -> Result<PathBuf, AssetError> {
        let path = dir.join(&self.filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| AssetError::Persist {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &self.data).map_err(|source| AssetError::Persist {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = self.data.len(), "wrote asset file");
        Ok(path)
    }
}
