//! Bootstrap asset lifecycle
//!
//! Generic contract for the nodes of a dependency-driven asset pipeline.
//!
//! # Core Concepts
//!
//! - [`Asset`]: declares dependencies and generates itself from them
//! - [`WritableAsset`]: produces [`AssetFile`]s and can be reloaded from them
//! - [`Parents`]: resolved dependencies, queried by type
//! - [`FileFetcher`]: source of previously written files; absence is not an error
//! - [`AssetState`]: the lifecycle every asset instance moves through once
//! - [`AssetStore`]: resolves dependency graphs, loading or generating each node
//!
//! # Example
//!
//! ```rust,ignore
//! use bootstrap_asset::{AssetStore, StoreConfig};
//!
//! let mut store = AssetStore::new(StoreConfig::new().with_asset_dir("./assets"));
//! store.register::<InstallConfig>().register::<Banner>();
//!
//! let banner = store.fetch::<Banner>()?;
//! for file in banner.files() {
//!     file.persist(store.config().asset_dir())?;
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod asset;
mod config;
mod error;
mod file;
mod hash;
mod parents;
mod state;
mod store;

/// YAML encoding of asset objects
pub mod codec;

/// File fetchers
pub mod fetch;

// Re-exports
pub use asset::{AsAny, Asset, AssetId, WritableAsset};
pub use config::StoreConfig;
pub use error::{AssetError, BoxError};
pub use fetch::{DirFetcher, FileFetcher, MemoryFetcher};
pub use file::AssetFile;
pub use hash::{ContentHash, HashError};
pub use parents::Parents;
pub use state::{allowed_transitions, validate_transition, AssetState, TransitionError};
pub use store::{AssetFactory, AssetSource, AssetStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
