//! InfraEnv manifest construction
//!
//! Pure mapping from the upstream configuration views to an
//! [`InfraEnvManifest`]. Either a complete manifest comes back or `None`
//! when there is no install configuration to build from.

use std::collections::BTreeMap;

use crate::arch;
use crate::upstream::{AgentConfig, InstallConfig, OptionalInstallConfig, ProxySettings};

use super::model::{
    ClusterReference, InfraEnvManifest, InfraEnvSpec, LabelSelector, LocalObjectReference,
    ObjectMeta, Proxy, API_VERSION, KIND,
};

/// Label linking NMState configs to the InfraEnv they apply to
pub const NMSTATE_CONFIG_LABEL: &str = "infraenvs.agent-install.openshift.io";

/// Build the manifest, or `None` when no install configuration was supplied
#[must_use]
pub fn build(install_config: &OptionalInstallConfig, agent_config: &AgentConfig) -> Option<InfraEnvManifest> {
    let config = install_config.config()?;

    let spec = InfraEnvSpec {
        cluster_ref: ClusterReference {
            name: cluster_deployment_name(config).to_string(),
            namespace: config.cluster_namespace().to_string(),
        },
        ssh_authorized_key: trim_ssh_key(&config.ssh_key).to_string(),
        pull_secret_ref: LocalObjectReference {
            name: pull_secret_name(config),
        },
        nm_state_config_label_selector: LabelSelector {
            match_labels: nmstate_config_labels(config),
        },
        cpu_architecture: config
            .control_plane_architecture()
            .map(|tag| arch::normalize(tag).to_string()),
        proxy: config.proxy.as_ref().map(proxy),
        additional_ntp_sources: agent_config
            .config()
            .and_then(|settings| settings.additional_ntp_sources.clone()),
    };

    Some(InfraEnvManifest {
        api_version: API_VERSION.to_string(),
        kind: KIND.to_string(),
        metadata: ObjectMeta {
            name: infra_env_name(config).to_string(),
            namespace: config.cluster_namespace().to_string(),
        },
        spec,
    })
}

/// Strip YAML block decoration and surrounding whitespace from key material
#[must_use]
pub fn trim_ssh_key(key: &str) -> &str {
    key.trim_matches(|c: char| c == '|' || c.is_whitespace())
}

/// Name of the InfraEnv object
#[must_use]
pub fn infra_env_name(config: &InstallConfig) -> &str {
    config.cluster_name()
}

/// Name of the owning cluster deployment
#[must_use]
pub fn cluster_deployment_name(config: &InstallConfig) -> &str {
    config.cluster_name()
}

/// Name of the pull secret object
#[must_use]
pub fn pull_secret_name(config: &InstallConfig) -> String {
    format!("{}-pull-secret", config.cluster_name())
}

/// Labels selecting the NMState configs of this InfraEnv
#[must_use]
pub fn nmstate_config_labels(config: &InstallConfig) -> BTreeMap<String, String> {
    BTreeMap::from([(
        NMSTATE_CONFIG_LABEL.to_string(),
        infra_env_name(config).to_string(),
    )])
}

fn proxy(settings: &ProxySettings) -> Proxy {
    Proxy {
        http_proxy: settings.http_proxy.clone(),
        https_proxy: settings.https_proxy.clone(),
        no_proxy: settings.no_proxy.clone(),
    }
}
