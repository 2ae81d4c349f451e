//! Testing utilities for the bootstrap workspace
//!
//! Shared fixtures for the upstream configuration assets and fetchers that
//! fail on demand.

#![allow(missing_docs)]

use std::io;
use std::path::Path;

use bootstrap_asset::{AssetFile, FileFetcher, Parents};
use bootstrap_manifests::upstream::{
    AgentConfig, AgentSettings, ClusterMetadata, InstallConfig, MachinePool,
    OptionalInstallConfig, ProxySettings,
};

pub const TEST_CLUSTER: &str = "ostest";
pub const TEST_NAMESPACE: &str = "cluster0";
pub const TEST_SSH_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQ test@example.com";

/// Builder for install configurations used across tests
#[derive(Debug, Clone)]
pub struct InstallConfigBuilder {
    config: InstallConfig,
}

impl Default for InstallConfigBuilder {
    fn default() -> Self {
        Self {
            config: InstallConfig {
                metadata: ClusterMetadata {
                    name: TEST_CLUSTER.into(),
                    namespace: TEST_NAMESPACE.into(),
                },
                ssh_key: TEST_SSH_KEY.into(),
                control_plane: None,
                proxy: None,
            },
        }
    }
}

impl InstallConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.config.metadata.name = name.into();
        self
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.config.metadata.namespace = namespace.into();
        self
    }

    pub fn ssh_key(mut self, key: &str) -> Self {
        self.config.ssh_key = key.into();
        self
    }

    pub fn architecture(mut self, arch: &str) -> Self {
        self.config.control_plane = Some(MachinePool {
            architecture: arch.into(),
        });
        self
    }

    pub fn proxy(mut self, http: &str, https: &str, no_proxy: &str) -> Self {
        self.config.proxy = Some(ProxySettings {
            http_proxy: http.into(),
            https_proxy: https.into(),
            no_proxy: no_proxy.into(),
        });
        self
    }

    pub fn build(self) -> InstallConfig {
        self.config
    }

    pub fn asset(self) -> OptionalInstallConfig {
        OptionalInstallConfig::new(self.config)
    }

    /// Render as the YAML a user would write to `install-config.yaml`
    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(&self.config).expect("install config serializes")
    }
}

pub fn agent_config(ntp_sources: Option<Vec<String>>) -> AgentConfig {
    AgentConfig::new(AgentSettings {
        additional_ntp_sources: ntp_sources,
    })
}

/// Resolved parents for an InfraEnv built from `install`
pub fn parents(install: OptionalInstallConfig, agent: AgentConfig) -> Parents {
    Parents::new().with(install).with(agent)
}

/// Fetcher whose every read fails with the given error kind
#[derive(Debug, Clone, Copy)]
pub struct FailingFetcher(pub io::ErrorKind);

impl FileFetcher for FailingFetcher {
    fn fetch_by_name(&self, name: &Path) -> io::Result<AssetFile> {
        Err(io::Error::new(
            self.0,
            format!("refusing to read {}", name.display()),
        ))
    }
}
