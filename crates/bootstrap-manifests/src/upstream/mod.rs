//! Upstream configuration assets
//!
//! Read-only views over the install configuration and the agent
//! configuration. Both follow the same lifecycle contract as the manifests
//! that consume them: generation yields "no configuration supplied", and
//! loading decodes the user's file leniently, keeping only the fields the
//! manifests read.

mod agent_config;
mod install_config;

pub use agent_config::{AgentConfig, AgentSettings, AGENT_CONFIG_FILENAME};
pub use install_config::{
    ClusterMetadata, InstallConfig, MachinePool, OptionalInstallConfig, ProxySettings,
    DEFAULT_CLUSTER_NAME, DEFAULT_CLUSTER_NAMESPACE, INSTALL_CONFIG_FILENAME,
};

use std::path::Path;

use bootstrap_asset::fetch::is_not_found;
use bootstrap_asset::{codec, AssetError, AssetFile, FileFetcher};
use serde::de::DeserializeOwned;

/// Fetch and decode a user-supplied configuration file
///
/// Returns `Ok(None)` when the file was never written.
fn load_config<T: DeserializeOwned>(
    fetcher: &dyn FileFetcher,
    filename: &str,
) -> Result<Option<(AssetFile, T)>, AssetError> {
    let file = match fetcher.fetch_by_name(Path::new(filename)) {
        Ok(file) => file,
        Err(err) if is_not_found(&err) => return Ok(None),
        Err(source) => {
            return Err(AssetError::Fetch {
                path: filename.into(),
                source,
            })
        }
    };
    let config = codec::decode(&file)?;
    Ok(Some((file, config)))
}
