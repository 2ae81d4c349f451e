//! Resolved-dependency registry
//!
//! [`Parents`] is the container an orchestrator fills with resolved assets
//! before calling [`Asset::generate`]. Assets query it by type and never
//! learn how their parents were produced.

use std::any::TypeId;
use std::collections::HashMap;

use crate::asset::{Asset, AssetId};
use crate::error::AssetError;

/// Resolved assets keyed by identity, in insertion order
#[derive(Debug, Default)]
pub struct Parents {
    assets: HashMap<TypeId, Box<dyn Asset>>,
    order: Vec<AssetId>,
}

impl Parents {
    /// Empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resolved asset, replacing any previous instance of its type
    pub fn insert<A: Asset + Default>(&mut self, asset: A) {
        self.insert_boxed(AssetId::of::<A>(), Box::new(asset));
    }

    /// Builder form of [`Parents::insert`]
    #[inline]
    #[must_use]
    pub fn with<A: Asset + Default>(mut self, asset: A) -> Self {
        self.insert(asset);
        self
    }

    /// Add a type-erased asset under `id`
    ///
    /// `id` must identify the concrete type behind `asset`.
    pub fn insert_boxed(&mut self, id: AssetId, asset: Box<dyn Asset>) {
        if self.assets.insert(id.type_id(), asset).is_none() {
            self.order.push(id);
        }
    }

    /// Typed lookup
    ///
    /// # Errors
    /// Returns [`AssetError::MissingDependency`] if no asset of type `A` is present
    pub fn get<A: Asset + Default>(&self) -> Result<&A, AssetError> {
        self.assets
            .get(&TypeId::of::<A>())
            // Deref through the Box so the downcast targets the asset, not the Box.
            .and_then(|asset| (**asset).as_any().downcast_ref::<A>())
            .ok_or_else(|| AssetError::MissingDependency(AssetId::of::<A>().name()))
    }

    /// Whether `id` has been resolved
    #[inline]
    #[must_use]
    pub fn contains(&self, id: AssetId) -> bool {
        self.assets.contains_key(&id.type_id())
    }

    /// Resolved assets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (AssetId, &dyn Asset)> + '_ {
        self.order.iter().filter_map(move |id| {
            self.assets.get(&id.type_id()).map(|asset| (*id, &**asset))
        })
    }

    /// Number of resolved assets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been resolved
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
