//! InfraEnv manifest schema
//!
//! Every type denies unknown fields so that a hand-edited manifest carrying
//! unsupported configuration fails to load instead of being silently
//! truncated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// API group/version written into generated manifests
pub const API_VERSION: &str = "agent-install.openshift.io/v1beta1";

/// Kind written into generated manifests
pub const KIND: &str = "InfraEnv";

/// Cluster network-bootstrap descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct InfraEnvManifest {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: InfraEnvSpec,
}

/// Name and namespace of an object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct InfraEnvSpec {
    /// Owning cluster resource
    pub cluster_ref: ClusterReference,

    /// Key authorized for SSH access to discovered hosts
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssh_authorized_key: String,

    pub pull_secret_ref: LocalObjectReference,

    /// Selects the NMState configs applied to hosts of this InfraEnv
    #[serde(default)]
    pub nm_state_config_label_selector: LabelSelector,

    /// Packaging-convention architecture; absent or empty means any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_architecture: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,

    #[serde(
        rename = "additionalNTPSources",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_ntp_sources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterReference {
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalObjectReference {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct LabelSelector {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Proxy {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub http_proxy: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub https_proxy: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub no_proxy: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn field_names_follow_the_custom_resource() {
        let manifest = InfraEnvManifest {
            api_version: API_VERSION.into(),
            kind: KIND.into(),
            metadata: ObjectMeta {
                name: "ostest".into(),
                namespace: "cluster0".into(),
            },
            spec: InfraEnvSpec {
                cluster_ref: ClusterReference {
                    name: "ostest".into(),
                    namespace: "cluster0".into(),
                },
                ssh_authorized_key: "ssh-rsa AAAA".into(),
                pull_secret_ref: LocalObjectReference {
                    name: "ostest-pull-secret".into(),
                },
                nm_state_config_label_selector: LabelSelector {
                    match_labels: BTreeMap::from([("app".to_string(), "ostest".to_string())]),
                },
                cpu_architecture: Some("x86_64".into()),
                proxy: None,
                additional_ntp_sources: Some(vec!["pool.ntp.org".into()]),
            },
        };

        let yaml = serde_yaml::to_string(&manifest).unwrap();

        assert_eq!(
            yaml,
            "\
apiVersion: agent-install.openshift.io/v1beta1
kind: InfraEnv
metadata:
  name: ostest
  namespace: cluster0
spec:
  clusterRef:
    name: ostest
    namespace: cluster0
  sshAuthorizedKey: ssh-rsa AAAA
  pullSecretRef:
    name: ostest-pull-secret
  nmStateConfigLabelSelector:
    matchLabels:
      app: ostest
  cpuArchitecture: x86_64
  additionalNTPSources:
  - pool.ntp.org
"
        );
    }

    #[test]
    fn nested_unknown_field_is_rejected() {
        let yaml = "\
metadata:
  name: a
spec:
  clusterRef: {name: a, namespace: b}
  pullSecretRef: {name: a-pull-secret, key: x}
";
        assert!(serde_yaml::from_str::<InfraEnvManifest>(yaml).is_err());
    }

    #[test]
    fn documents_without_type_meta_decode() {
        let yaml = "\
metadata:
  name: a
spec:
  clusterRef: {name: a, namespace: b}
  pullSecretRef: {name: a-pull-secret}
";
        let manifest: InfraEnvManifest = serde_yaml::from_str(yaml).unwrap();
        assert!(manifest.api_version.is_empty());
        assert_eq!(manifest.spec.cpu_architecture, None);
    }
}
