//! Agent installer manifests
//!
//! Assets that turn the user's install and agent configuration into the
//! manifests the agent-based installer boots from.
//!
//! # Example
//!
//! ```rust,ignore
//! use bootstrap_asset::{AssetStore, StoreConfig, WritableAsset};
//! use bootstrap_manifests::{register_all, InfraEnv};
//!
//! let mut store = AssetStore::new(StoreConfig::new().with_asset_dir("./cluster"));
//! register_all(&mut store);
//!
//! let infra_env = store.fetch::<InfraEnv>()?;
//! if let Some(manifest) = infra_env.manifest() {
//!     println!("InfraEnv {}", manifest.metadata.name);
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod arch;
pub mod infraenv;
pub mod upstream;

use bootstrap_asset::AssetStore;

pub use arch::{normalize, Architecture};
pub use infraenv::{InfraEnv, InfraEnvManifest, ValidationError, INFRA_ENV_FILENAME};
pub use upstream::{AgentConfig, InstallConfig, OptionalInstallConfig};

/// Register every asset type this crate provides
pub fn register_all(store: &mut AssetStore) -> &mut AssetStore {
    store
        .register::<OptionalInstallConfig>()
        .register::<AgentConfig>()
        .register::<InfraEnv>()
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
