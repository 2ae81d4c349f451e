//! Store configuration

use std::path::{Path, PathBuf};

/// Configuration for [`crate::AssetStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory previously written files are fetched from
    pub asset_dir: PathBuf,
    /// Whether derived writable assets are loaded from `asset_dir` before
    /// generating; assets without dependencies are always loaded
    pub load_from_disk: bool,
}

impl StoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With asset directory
    #[inline]
    #[must_use]
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    /// With load-before-generate enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_load_from_disk(mut self, enabled: bool) -> Self {
        self.load_from_disk = enabled;
        self
    }

    /// Asset directory
    #[inline]
    #[must_use]
    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("."),
            load_from_disk: true,
        }
    }
}
