//! Invariants an InfraEnv manifest must satisfy however it was produced

use crate::arch::Architecture;

use super::model::InfraEnvManifest;

/// Semantic rejection of an InfraEnv manifest
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Generate or load claimed success without producing a manifest
    #[error("missing configuration or manifest file")]
    MissingConfiguration,

    /// Architecture outside the supported set
    #[error("Config.Spec.CpuArchitecture {0} is not supported")]
    UnsupportedArchitecture(String),
}

/// Check the manifest invariants
///
/// # Errors
/// - [`ValidationError::MissingConfiguration`] if `manifest` is `None`
/// - [`ValidationError::UnsupportedArchitecture`] if the architecture is
///   neither empty nor one of `x86_64`, `aarch64`, `ppc64le`
pub fn validate(manifest: Option<&InfraEnvManifest>) -> Result<(), ValidationError> {
    let manifest = manifest.ok_or(ValidationError::MissingConfiguration)?;

    match manifest.spec.cpu_architecture.as_deref() {
        None | Some("") => Ok(()),
        Some(arch)
            if Architecture::SUPPORTED
                .iter()
                .any(|supported| supported.rpm_name() == arch) =>
        {
            Ok(())
        }
        Some(arch) => Err(ValidationError::UnsupportedArchitecture(arch.to_string())),
    }
}
