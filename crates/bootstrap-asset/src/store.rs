//! Dependency-ordered asset resolution
//!
//! [`AssetStore`] plays the outer-pipeline role: it instantiates registered
//! asset types, resolves their dependencies depth-first, loads writable
//! assets from previously written files when configured to, falls back to
//! generation, and publishes every resolved asset into [`Parents`].

use std::any::TypeId;
use std::collections::HashMap;

use tracing::{debug, info};

use crate::asset::{Asset, AssetId};
use crate::config::StoreConfig;
use crate::error::AssetError;
use crate::fetch::{DirFetcher, FileFetcher};
use crate::file::AssetFile;
use crate::parents::Parents;

/// Constructor for a registered asset type
pub type AssetFactory = fn() -> Box<dyn Asset>;

/// How a resolved asset was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSource {
    /// Built from dependencies
    Generated,
    /// Rehydrated from a previously written file
    Loaded,
}

fn factory<A: Asset + Default>() -> Box<dyn Asset> {
    Box::new(A::default())
}

/// Resolves assets and their dependency graphs
#[derive(Debug)]
pub struct AssetStore {
    config: StoreConfig,
    fetcher: Box<dyn FileFetcher>,
    factories: HashMap<TypeId, AssetFactory>,
    parents: Parents,
    sources: HashMap<TypeId, AssetSource>,
    resolving: Vec<AssetId>,
}

impl AssetStore {
    /// Store fetching from `config.asset_dir`
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        let fetcher = DirFetcher::new(config.asset_dir());
        Self::with_fetcher(config, Box::new(fetcher))
    }

    /// Store fetching through a custom fetcher
    #[must_use]
    pub fn with_fetcher(config: StoreConfig, fetcher: Box<dyn FileFetcher>) -> Self {
        Self {
            config,
            fetcher,
            factories: HashMap::new(),
            parents: Parents::new(),
            sources: HashMap::new(),
            resolving: Vec::new(),
        }
    }

    /// Register asset type `A` so it can be resolved
    pub fn register<A: Asset + Default>(&mut self) -> &mut Self {
        self.factories.insert(TypeId::of::<A>(), factory::<A>);
        self
    }

    /// Resolve `A` and everything it depends on
    ///
    /// # Errors
    /// Returns error if a type in the graph is unregistered, the graph is
    /// cyclic, or any asset fails to load or generate
    pub fn fetch<A: Asset + Default>(&mut self) -> Result<&A, AssetError> {
        self.resolve(AssetId::of::<A>())?;
        self.parents.get::<A>()
    }

    /// Already-resolved asset of type `A`
    ///
    /// # Errors
    /// Returns [`AssetError::MissingDependency`] if `A` was not resolved
    pub fn get<A: Asset + Default>(&self) -> Result<&A, AssetError> {
        self.parents.get::<A>()
    }

    /// How `id` was produced, if resolved
    #[inline]
    #[must_use]
    pub fn source(&self, id: AssetId) -> Option<AssetSource> {
        self.sources.get(&id.type_id()).copied()
    }

    /// Everything resolved so far
    #[inline]
    #[must_use]
    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    /// Files of every resolved writable asset, in resolution order
    #[must_use]
    pub fn files(&self) -> Vec<&AssetFile> {
        self.parents
            .iter()
            .filter_map(|(_, asset)| asset.as_writable())
            .flat_map(|writable| writable.files())
            .collect()
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn resolve(&mut self, id: AssetId) -> Result<(), AssetError> {
        if self.parents.contains(id) {
            return Ok(());
        }
        if let Some(start) = self.resolving.iter().position(|pending| *pending == id) {
            let mut path: Vec<_> = self.resolving[start..].iter().map(|p| p.name()).collect();
            path.push(id.name());
            return Err(AssetError::CyclicDependency { path });
        }

        let make = *self
            .factories
            .get(&id.type_id())
            .ok_or(AssetError::UnknownAsset(id.name()))?;
        let mut asset = make();

        self.resolving.push(id);
        let resolved = asset
            .dependencies()
            .into_iter()
            .try_for_each(|dep| self.resolve(dep));
        self.resolving.pop();
        resolved?;

        let source = self.produce(asset.as_mut())?;
        self.parents.insert_boxed(id, asset);
        self.sources.insert(id.type_id(), source);
        Ok(())
    }

    fn produce(&self, asset: &mut dyn Asset) -> Result<AssetSource, AssetError> {
        // Assets without dependencies are user inputs and always come from disk.
        if self.config.load_from_disk || asset.dependencies().is_empty() {
            if let Some(writable) = asset.as_writable_mut() {
                if writable.load(&*self.fetcher)? {
                    info!(asset = writable.name(), "loaded asset from previously written files");
                    return Ok(AssetSource::Loaded);
                }
            }
        }
        debug!(asset = asset.name(), "generating asset");
        asset.generate(&self.parents)?;
        Ok(AssetSource::Generated)
    }
}
