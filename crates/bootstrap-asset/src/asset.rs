//! Asset traits and identity
//!
//! Defines the [`Asset`] contract every pipeline node implements, the
//! [`WritableAsset`] extension for assets that persist files, and
//! [`AssetId`], the identity used to declare and look up dependencies.

use std::any::{Any, TypeId};
use std::fmt::{self, Debug, Display, Formatter};

use crate::error::AssetError;
use crate::fetch::FileFetcher;
use crate::file::AssetFile;
use crate::parents::Parents;

/// Upcast support so type-erased assets can be downcast to their concrete type
///
/// Blanket-implemented for every `'static + Send + Sync` type; never
/// implement it by hand.
pub trait AsAny: Any + Send + Sync {
    /// View as [`Any`]
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + Sync> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A unit of generated or loaded configuration with declared dependencies
///
/// # Contract
/// - `dependencies` is static: the same list for every instance
/// - `generate` is called at most once, after every dependency is present
///   in `parents`
/// - absence of upstream configuration is not an error
///
/// # Example
/// ```rust,ignore
/// #[derive(Debug, Default)]
/// struct Banner { text: Option<String> }
///
/// impl Asset for Banner {
///     fn name(&self) -> &'static str { "Banner" }
///     fn dependencies(&self) -> Vec<AssetId> { vec![AssetId::of::<ClusterName>()] }
///     fn generate(&mut self, parents: &Parents) -> Result<(), AssetError> {
///         let cluster = parents.get::<ClusterName>()?;
///         self.text = Some(format!("welcome to {}", cluster.value()));
///         Ok(())
///     }
/// }
/// ```
pub trait Asset: AsAny + Debug {
    /// Human friendly name
    fn name(&self) -> &'static str;

    /// Assets that must be resolved before [`Asset::generate`] runs
    fn dependencies(&self) -> Vec<AssetId>;

    /// Build this asset from its resolved dependencies
    ///
    /// # Errors
    /// Returns error if a dependency is missing or the result is invalid
    fn generate(&mut self, parents: &Parents) -> Result<(), AssetError>;

    /// Writable view, for assets that persist files
    fn as_writable(&self) -> Option<&dyn WritableAsset> {
        None
    }

    /// Mutable writable view, for assets that persist files
    fn as_writable_mut(&mut self) -> Option<&mut dyn WritableAsset> {
        None
    }
}

/// An asset that produces files and can be rehydrated from them
pub trait WritableAsset: Asset {
    /// Files produced by the last successful generate or load
    ///
    /// Empty when nothing was produced.
    fn files(&self) -> &[AssetFile];

    /// Rehydrate from previously written files
    ///
    /// Returns `Ok(false)` when nothing was written yet.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, decoded or validated
    fn load(&mut self, fetcher: &dyn FileFetcher) -> Result<bool, AssetError>;
}

/// Identity of an asset type
///
/// Equality and hashing use the Rust type only; the name is carried for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct AssetId {
    type_id: TypeId,
    name: &'static str,
}

impl AssetId {
    /// Identity of asset type `A`
    #[must_use]
    pub fn of<A: Asset + Default>() -> Self {
        Self {
            type_id: TypeId::of::<A>(),
            name: A::default().name(),
        }
    }

    /// Rust type identity
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Human friendly name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for AssetId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for AssetId {}

impl std::hash::Hash for AssetId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl Debug for AssetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AssetId").field(&self.name).finish()
    }
}

impl Display for AssetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
