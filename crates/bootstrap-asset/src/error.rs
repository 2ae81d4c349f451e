//! Error types for the asset lifecycle
//!
//! Covers the three failure families an asset can report:
//! - Dependency resolution (missing, unknown or cyclic parents)
//! - Persistence (fetch, encode, decode, write)
//! - Semantic rejection of an otherwise well-formed asset

use std::io;
use std::path::PathBuf;

use crate::state::TransitionError;

/// Boxed error reported by an asset's own validation
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while resolving, generating, loading or persisting assets
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// A declared dependency was not present in the parents registry
    #[error("dependency {0} has not been resolved")]
    MissingDependency(&'static str),

    /// No factory is registered for a requested asset
    #[error("no factory registered for asset {0}")]
    UnknownAsset(&'static str),

    /// The dependency graph loops back on itself
    #[error("cyclic dependency: {}", path.join(" -> "))]
    CyclicDependency { path: Vec<&'static str> },

    /// Fetching a previously written file failed for a reason other than absence
    #[error("failed to load {} file: {source}", path.display())]
    Fetch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Encoding the in-memory object failed
    #[error("failed to marshal {asset}: {source}")]
    Serialize {
        asset: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    /// Decoding a fetched file failed (malformed or unknown fields)
    #[error("failed to unmarshal {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Writing a file artifact to disk failed
    #[error("failed to write {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The asset rejected its own content
    #[error("{asset}: {source}")]
    Invalid {
        asset: &'static str,
        #[source]
        source: BoxError,
    },

    /// A lifecycle call arrived in a state that does not accept it
    #[error("{asset}: {source}")]
    Transition {
        asset: &'static str,
        #[source]
        source: TransitionError,
    },
}

impl AssetError {
    /// Create a validation failure for `asset`
    #[inline]
    pub fn invalid(asset: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Invalid {
            asset,
            source: source.into(),
        }
    }

    /// Check if this is a decode failure
    #[inline]
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Downcast the validation source, if this is an [`AssetError::Invalid`]
    #[must_use]
    pub fn validation_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Invalid { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}
