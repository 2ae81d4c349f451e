//! File fetchers
//!
//! A [`FileFetcher`] returns the bytes previously written for a relative
//! path. Absence is reported as an [`io::Error`] of kind
//! [`io::ErrorKind::NotFound`]; callers treat that as "not generated yet"
//! rather than as a failure.

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::file::AssetFile;

/// Source of previously written asset files
pub trait FileFetcher: Debug {
    /// Fetch the file stored under `name`
    ///
    /// # Errors
    /// Returns an error of kind [`io::ErrorKind::NotFound`] when nothing was
    /// written for `name`, or any other I/O error when reading fails
    fn fetch_by_name(&self, name: &Path) -> io::Result<AssetFile>;
}

/// Whether a fetch error means "not written yet"
#[inline]
#[must_use]
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Fetches files relative to a directory on disk
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    /// Fetcher rooted at `root`
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileFetcher for DirFetcher {
    fn fetch_by_name(&self, name: &Path) -> io::Result<AssetFile> {
        let data = fs::read(self.root.join(name))?;
        Ok(AssetFile::new(name, data))
    }
}

/// In-memory fetcher
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFetcher {
    /// Empty fetcher
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `name`
    pub fn insert(&mut self, name: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), data.into());
    }

    /// Builder form of [`MemoryFetcher::insert`]
    #[inline]
    #[must_use]
    pub fn with_file(mut self, name: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(name, data);
        self
    }

    /// Store every file an asset produced
    pub fn extend<'a>(&mut self, files: impl IntoIterator<Item = &'a AssetFile>) {
        for file in files {
            self.insert(file.filename(), file.data());
        }
    }
}

impl FileFetcher for MemoryFetcher {
    fn fetch_by_name(&self, name: &Path) -> io::Result<AssetFile> {
        self.files
            .get(name)
            .map(|data| AssetFile::new(name, data.clone()))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} does not exist", name.display()),
                )
            })
    }
}
