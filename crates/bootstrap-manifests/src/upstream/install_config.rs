//! Install configuration view

use bootstrap_asset::{Asset, AssetError, AssetFile, AssetId, FileFetcher, Parents, WritableAsset};
use serde::{Deserialize, Serialize};

use super::load_config;

/// File the install configuration is read from
pub const INSTALL_CONFIG_FILENAME: &str = "install-config.yaml";

/// Cluster name used when the install configuration leaves it empty
pub const DEFAULT_CLUSTER_NAME: &str = "agent-cluster";

/// Namespace used when the install configuration leaves it empty
pub const DEFAULT_CLUSTER_NAMESPACE: &str = "cluster0";

/// The fields of an install configuration the agent manifests read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    #[serde(default)]
    pub metadata: ClusterMetadata,

    /// SSH public key material, possibly with YAML block decoration
    #[serde(default)]
    pub ssh_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane: Option<MachinePool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxySettings>,
}

/// Cluster identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// Control-plane machine pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachinePool {
    /// Platform-convention architecture (`amd64`, `arm64`, ...)
    #[serde(default)]
    pub architecture: String,
}

/// Cluster-wide proxy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxySettings {
    #[serde(default)]
    pub http_proxy: String,
    #[serde(default)]
    pub https_proxy: String,
    #[serde(default)]
    pub no_proxy: String,
}

impl InstallConfig {
    /// Cluster name, defaulted when empty
    #[must_use]
    pub fn cluster_name(&self) -> &str {
        non_empty_or(&self.metadata.name, DEFAULT_CLUSTER_NAME)
    }

    /// Cluster namespace, defaulted when empty
    #[must_use]
    pub fn cluster_namespace(&self) -> &str {
        non_empty_or(&self.metadata.namespace, DEFAULT_CLUSTER_NAMESPACE)
    }

    /// Control-plane architecture, if one is set
    #[must_use]
    pub fn control_plane_architecture(&self) -> Option<&str> {
        self.control_plane
            .as_ref()
            .map(|pool| pool.architecture.as_str())
            .filter(|arch| !arch.is_empty())
    }
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Install configuration asset; `config` is `None` when the user supplied none
#[derive(Debug, Default)]
pub struct OptionalInstallConfig {
    config: Option<InstallConfig>,
    file: Option<AssetFile>,
}

impl OptionalInstallConfig {
    /// Asset already holding `config`
    #[inline]
    #[must_use]
    pub fn new(config: InstallConfig) -> Self {
        Self {
            config: Some(config),
            file: None,
        }
    }

    /// The configuration, if supplied
    #[inline]
    #[must_use]
    pub fn config(&self) -> Option<&InstallConfig> {
        self.config.as_ref()
    }
}

impl Asset for OptionalInstallConfig {
    fn name(&self) -> &'static str {
        "Optional Install Config"
    }

    fn dependencies(&self) -> Vec<AssetId> {
        Vec::new()
    }

    fn generate(&mut self, _parents: &Parents) -> Result<(), AssetError> {
        tracing::debug!("no {} supplied", INSTALL_CONFIG_FILENAME);
        Ok(())
    }

    fn as_writable(&self) -> Option<&dyn WritableAsset> {
        Some(self)
    }

    fn as_writable_mut(&mut self) -> Option<&mut dyn WritableAsset> {
        Some(self)
    }
}

impl WritableAsset for OptionalInstallConfig {
    fn files(&self) -> &[AssetFile] {
        self.file.as_slice()
    }

    fn load(&mut self, fetcher: &dyn FileFetcher) -> Result<bool, AssetError> {
        let Some((file, config)) = load_config::<InstallConfig>(fetcher, INSTALL_CONFIG_FILENAME)?
        else {
            return Ok(false);
        };
        self.file = Some(file);
        self.config = Some(config);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootstrap_asset::MemoryFetcher;

    const SAMPLE: &str = r"
apiVersion: v1
baseDomain: example.com
metadata:
  name: ostest
  namespace: cluster1
controlPlane:
  name: master
  replicas: 3
  architecture: arm64
proxy:
  httpProxy: http://proxy:3128
  noProxy: .example.com
pullSecret: '{}'
sshKey: |
  ssh-rsa AAAA
";

    #[test]
    fn load_decodes_known_fields_and_ignores_the_rest() {
        let fetcher = MemoryFetcher::new().with_file(INSTALL_CONFIG_FILENAME, SAMPLE);
        let mut asset = OptionalInstallConfig::default();

        assert!(asset.load(&fetcher).unwrap());

        let config = asset.config().unwrap();
        assert_eq!(config.cluster_name(), "ostest");
        assert_eq!(config.cluster_namespace(), "cluster1");
        assert_eq!(config.control_plane_architecture(), Some("arm64"));
        assert_eq!(config.ssh_key, "ssh-rsa AAAA\n");
        let proxy = config.proxy.as_ref().unwrap();
        assert_eq!(proxy.http_proxy, "http://proxy:3128");
        assert_eq!(proxy.https_proxy, "");
        assert_eq!(asset.files().len(), 1);
    }

    #[test]
    fn load_without_file_reports_not_found() {
        let mut asset = OptionalInstallConfig::default();
        assert!(!asset.load(&MemoryFetcher::new()).unwrap());
        assert!(asset.config().is_none());
        assert!(asset.files().is_empty());
    }

    #[test]
    fn generate_leaves_config_absent() {
        let mut asset = OptionalInstallConfig::default();
        asset.generate(&Parents::new()).unwrap();
        assert!(asset.config().is_none());
    }

    #[test]
    fn names_default_when_empty() {
        let config = InstallConfig::default();
        assert_eq!(config.cluster_name(), DEFAULT_CLUSTER_NAME);
        assert_eq!(config.cluster_namespace(), DEFAULT_CLUSTER_NAMESPACE);
    }

    #[test]
    fn empty_architecture_is_absent() {
        let config = InstallConfig {
            control_plane: Some(MachinePool::default()),
            ..InstallConfig::default()
        };
        assert_eq!(config.control_plane_architecture(), None);
    }
}
