//! YAML encoding of asset objects
//!
//! Strictness is a property of the target type: manifest types derive
//! `#[serde(deny_unknown_fields)]`, so [`decode`] rejects documents carrying
//! fields outside their schema. Upstream readers that only look at a few
//! fields leave it off and decode leniently through the same function.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AssetError;
use crate::file::AssetFile;

/// Encode `value` as a single YAML document
///
/// # Errors
/// Returns [`AssetError::Serialize`] naming `asset` if encoding fails
pub fn encode<T: Serialize>(asset: &'static str, value: &T) -> Result<Vec<u8>, AssetError> {
    serde_yaml::to_string(value)
        .map(String::into_bytes)
        .map_err(|source| AssetError::Serialize { asset, source })
}

/// Decode the YAML document held by `file`
///
/// # Errors
/// Returns [`AssetError::Decode`] naming the file path if the content is
/// malformed or violates the schema of `T`
pub fn decode<T: DeserializeOwned>(file: &AssetFile) -> Result<T, AssetError> {
    serde_yaml::from_slice(file.data()).map_err(|source| AssetError::Decode {
        path: file.filename().to_path_buf(),
        source,
    })
}
