//! Agent configuration view

use bootstrap_asset::{Asset, AssetError, AssetFile, AssetId, FileFetcher, Parents, WritableAsset};
use serde::{Deserialize, Serialize};

use super::load_config;

/// File the agent configuration is read from
pub const AGENT_CONFIG_FILENAME: &str = "agent-config.yaml";

/// The fields of an agent configuration the manifests read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentSettings {
    #[serde(
        rename = "additionalNTPSources",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_ntp_sources: Option<Vec<String>>,
}

/// Agent configuration asset; `config` is `None` when the user supplied none
#[derive(Debug, Default)]
pub struct AgentConfig {
    config: Option<AgentSettings>,
    file: Option<AssetFile>,
}

impl AgentConfig {
    /// Asset already holding `config`
    #[inline]
    #[must_use]
    pub fn new(config: AgentSettings) -> Self {
        Self {
            config: Some(config),
            file: None,
        }
    }

    /// The configuration, if supplied
    #[inline]
    #[must_use]
    pub fn config(&self) -> Option<&AgentSettings> {
        self.config.as_ref()
    }
}

impl Asset for AgentConfig {
    fn name(&self) -> &'static str {
        "Agent Config"
    }

    fn dependencies(&self) -> Vec<AssetId> {
        Vec::new()
    }

    fn generate(&mut self, _parents: &Parents) -> Result<(), AssetError> {
        tracing::debug!("no {} supplied", AGENT_CONFIG_FILENAME);
        Ok(())
    }

    fn as_writable(&self) -> Option<&dyn WritableAsset> {
        Some(self)
    }

    fn as_writable_mut(&mut self) -> Option<&mut dyn WritableAsset> {
        Some(self)
    }
}

impl WritableAsset for AgentConfig {
    fn files(&self) -> &[AssetFile] {
        self.file.as_slice()
    }

    fn load(&mut self, fetcher: &dyn FileFetcher) -> Result<bool, AssetError> {
        let Some((file, config)) = load_config::<AgentSettings>(fetcher, AGENT_CONFIG_FILENAME)?
        else {
            return Ok(false);
        };
        self.file = Some(file);
        self.config = Some(config);
        Ok(true)
    }
}
