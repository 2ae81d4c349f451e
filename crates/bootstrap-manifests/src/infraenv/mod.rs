//! InfraEnv manifest asset
//!
//! Generates `cluster-manifests/infraenv.yaml` from the install and agent
//! configuration, or reloads it from a previous run. Both paths end in the
//! same [`validate`] call before the asset is usable.

mod builder;
mod model;
mod validate;

pub use builder::{
    build, cluster_deployment_name, infra_env_name, nmstate_config_labels, pull_secret_name,
    trim_ssh_key, NMSTATE_CONFIG_LABEL,
};
pub use model::{
    ClusterReference, InfraEnvManifest, InfraEnvSpec, LabelSelector, LocalObjectReference,
    ObjectMeta, Proxy, API_VERSION, KIND,
};
pub use validate::{validate, ValidationError};

use std::path::Path;

use bootstrap_asset::fetch::is_not_found;
use bootstrap_asset::{
    codec, validate_transition, Asset, AssetError, AssetFile, AssetId, AssetState, FileFetcher,
    Parents, WritableAsset,
};
use tracing::{debug, info, warn};

use crate::arch;
use crate::upstream::{AgentConfig, OptionalInstallConfig};

/// Directory holding the cluster manifests
pub const CLUSTER_MANIFEST_DIR: &str = "cluster-manifests";

/// Canonical path of the InfraEnv manifest
pub const INFRA_ENV_FILENAME: &str = "cluster-manifests/infraenv.yaml";

/// InfraEnv asset controller
#[derive(Debug, Default)]
pub struct InfraEnv {
    state: AssetState,
    file: Option<AssetFile>,
    config: Option<InfraEnvManifest>,
}

impl InfraEnv {
    /// Lifecycle state
    #[inline]
    #[must_use]
    pub fn state(&self) -> AssetState {
        self.state
    }

    /// The validated manifest, once generated or loaded
    #[inline]
    #[must_use]
    pub fn manifest(&self) -> Option<&InfraEnvManifest> {
        self.config.as_ref()
    }

    fn transition(&mut self, to: AssetState) -> Result<(), AssetError> {
        validate_transition(self.state, to).map_err(|source| AssetError::Transition {
            asset: self.name(),
            source,
        })?;
        self.state = to;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), AssetError> {
        self.state.ensure_open().map_err(|source| AssetError::Transition {
            asset: self.name(),
            source,
        })
    }

    /// Mark the asset invalid and hand back `err`
    fn fail(&mut self, err: AssetError) -> AssetError {
        match self.transition(AssetState::Invalid) {
            Ok(()) => err,
            Err(transition) => transition,
        }
    }

    /// Shared tail of generate and load: validate, then publish
    fn finish(
        &mut self,
        manifest: InfraEnvManifest,
        file: AssetFile,
        to: AssetState,
    ) -> Result<(), AssetError> {
        if let Err(err) = validate(Some(&manifest)) {
            warn!(path = INFRA_ENV_FILENAME, error = %err, "rejecting InfraEnv manifest");
            return Err(self.fail(AssetError::invalid(self.name(), err)));
        }
        self.transition(to)?;
        self.config = Some(manifest);
        self.file = Some(file);
        Ok(())
    }
}

impl Asset for InfraEnv {
    fn name(&self) -> &'static str {
        "InfraEnv Config"
    }

    fn dependencies(&self) -> Vec<AssetId> {
        vec![
            AssetId::of::<OptionalInstallConfig>(),
            AssetId::of::<AgentConfig>(),
        ]
    }

    fn generate(&mut self, parents: &Parents) -> Result<(), AssetError> {
        self.ensure_open()?;
        let install_config = parents.get::<OptionalInstallConfig>()?;
        let agent_config = parents.get::<AgentConfig>()?;

        let Some(manifest) = build(install_config, agent_config) else {
            info!("no install configuration, skipping {}", INFRA_ENV_FILENAME);
            return self.transition(AssetState::Skipped);
        };

        let data = match codec::encode(self.name(), &manifest) {
            Ok(data) => data,
            Err(err) => return Err(self.fail(err)),
        };
        debug!(
            name = %manifest.metadata.name,
            namespace = %manifest.metadata.namespace,
            "generated InfraEnv manifest"
        );
        self.finish(
            manifest,
            AssetFile::new(INFRA_ENV_FILENAME, data),
            AssetState::Generated,
        )
    }

    fn as_writable(&self) -> Option<&dyn WritableAsset> {
        Some(self)
    }

    fn as_writable_mut(&mut self) -> Option<&mut dyn WritableAsset> {
        Some(self)
    }
}

impl WritableAsset for InfraEnv {
    fn files(&self) -> &[AssetFile] {
        self.file.as_slice()
    }

    fn load(&mut self, fetcher: &dyn FileFetcher) -> Result<bool, AssetError> {
        self.ensure_open()?;
        let file = match fetcher.fetch_by_name(Path::new(INFRA_ENV_FILENAME)) {
            Ok(file) => file,
            Err(err) if is_not_found(&err) => {
                debug!(path = INFRA_ENV_FILENAME, "InfraEnv manifest not written yet");
                return Ok(false);
            }
            Err(source) => {
                return Err(self.fail(AssetError::Fetch {
                    path: INFRA_ENV_FILENAME.into(),
                    source,
                }))
            }
        };

        // A document that does not decode leaves the asset untouched.
        let mut manifest: InfraEnvManifest = codec::decode(&file)?;

        // Files written by older releases may carry platform-convention names.
        if let Some(cpu_arch) = manifest.spec.cpu_architecture.as_mut() {
            if !cpu_arch.is_empty() {
                let normalized = arch::normalize(cpu_arch).to_string();
                *cpu_arch = normalized;
            }
        }

        self.finish(manifest, file, AssetState::Loaded)?;
        info!(path = INFRA_ENV_FILENAME, "loaded InfraEnv manifest");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{ClusterMetadata, InstallConfig, MachinePool};
    use bootstrap_asset::{MemoryFetcher, TransitionError};

    fn parents(arch: &str) -> Parents {
        let install = InstallConfig {
            metadata: ClusterMetadata {
                name: "ostest".into(),
                namespace: "cluster0".into(),
            },
            ssh_key: "ssh-rsa AAAA".into(),
            control_plane: Some(MachinePool {
                architecture: arch.into(),
            }),
            proxy: None,
        };
        Parents::new()
            .with(OptionalInstallConfig::new(install))
            .with(AgentConfig::default())
    }

    #[test]
    fn declares_both_upstream_dependencies() {
        let deps = InfraEnv::default().dependencies();
        assert_eq!(
            deps,
            vec![
                AssetId::of::<OptionalInstallConfig>(),
                AssetId::of::<AgentConfig>()
            ]
        );
    }

    #[test]
    fn generate_produces_one_file_at_canonical_path() {
        let mut asset = InfraEnv::default();
        asset.generate(&parents("amd64")).unwrap();

        assert_eq!(asset.state(), AssetState::Generated);
        assert_eq!(asset.files().len(), 1);
        assert_eq!(asset.files()[0].filename(), Path::new(INFRA_ENV_FILENAME));
        assert!(INFRA_ENV_FILENAME.starts_with(CLUSTER_MANIFEST_DIR));
        assert_eq!(
            asset.manifest().unwrap().spec.cpu_architecture.as_deref(),
            Some("x86_64")
        );
    }

    #[test]
    fn generate_requires_resolved_dependencies() {
        let mut asset = InfraEnv::default();
        let err = asset.generate(&Parents::new()).unwrap_err();
        assert!(matches!(
            err,
            AssetError::MissingDependency("Optional Install Config")
        ));
        assert_eq!(asset.state(), AssetState::Uninitialized);
    }

    #[test]
    fn generate_skips_without_install_config() {
        let parents = Parents::new()
            .with(OptionalInstallConfig::default())
            .with(AgentConfig::default());
        let mut asset = InfraEnv::default();

        asset.generate(&parents).unwrap();

        assert_eq!(asset.state(), AssetState::Skipped);
        assert!(asset.files().is_empty());
        assert!(asset.manifest().is_none());
    }

    #[test]
    fn generate_rejects_unsupported_architecture() {
        let mut asset = InfraEnv::default();
        let err = asset.generate(&parents("s390x")).unwrap_err();

        assert_eq!(
            err.validation_source::<ValidationError>(),
            Some(&ValidationError::UnsupportedArchitecture("s390x".into()))
        );
        assert_eq!(asset.state(), AssetState::Invalid);
        assert!(asset.files().is_empty());
    }

    #[test]
    fn second_generate_is_refused() {
        let mut asset = InfraEnv::default();
        asset.generate(&parents("amd64")).unwrap();

        let err = asset.generate(&parents("amd64")).unwrap_err();

        assert!(matches!(
            err,
            AssetError::Transition {
                source: TransitionError::Settled(AssetState::Generated),
                ..
            }
        ));
    }

    #[test]
    fn load_renormalizes_legacy_architecture() {
        let yaml = "\
metadata:
  name: ostest
  namespace: cluster0
spec:
  clusterRef: {name: ostest, namespace: cluster0}
  pullSecretRef: {name: ostest-pull-secret}
  cpuArchitecture: arm64
";
        let fetcher = MemoryFetcher::new().with_file(INFRA_ENV_FILENAME, yaml);
        let mut asset = InfraEnv::default();

        assert!(asset.load(&fetcher).unwrap());
        assert_eq!(asset.state(), AssetState::Loaded);
        assert_eq!(
            asset.manifest().unwrap().spec.cpu_architecture.as_deref(),
            Some("aarch64")
        );
        // The file is kept as read.
        assert_eq!(asset.files()[0].data(), yaml.as_bytes());
    }

    #[test]
    fn decode_failure_leaves_asset_open() {
        let fetcher = MemoryFetcher::new().with_file(
            INFRA_ENV_FILENAME,
            "metadata: {name: ostest}\nspec:\n  bogus: true\n",
        );
        let mut asset = InfraEnv::default();

        let err = asset.load(&fetcher).unwrap_err();

        assert!(err.is_decode());
        assert_eq!(asset.state(), AssetState::Uninitialized);
        asset.generate(&parents("amd64")).unwrap();
        assert_eq!(asset.state(), AssetState::Generated);
    }

    #[test]
    fn load_after_settling_is_refused() {
        let mut asset = InfraEnv::default();
        asset.generate(&parents("amd64")).unwrap();
        let err = asset.load(&MemoryFetcher::new()).unwrap_err();
        assert!(matches!(err, AssetError::Transition { .. }));
    }
}
