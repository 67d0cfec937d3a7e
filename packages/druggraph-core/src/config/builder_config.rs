//! Graph builder configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigFileV1;

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Mention detection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MentionConfig {
    /// Also link each mentioned drug to the journal of the mentioning
    /// publication / trial (`mention_type: journal`)
    pub propagate_to_journals: bool,

    /// Scan the drug list with rayon when matching a title
    pub parallel: bool,

    /// Drug count under which the scan stays sequential even when `parallel`
    pub min_parallel_drugs: usize,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            propagate_to_journals: false,
            parallel: false,
            min_parallel_drugs: 256,
        }
    }
}

/// Graph builder configuration
///
/// ```rust,ignore
/// let config = BuilderConfig::default().propagate_to_journals(true);
/// let config = BuilderConfig::from_yaml("druggraph.yaml")?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuilderConfig {
    pub mentions: MentionConfig,
}

impl BuilderConfig {
    pub fn propagate_to_journals(mut self, enabled: bool) -> Self {
        self.mentions.propagate_to_journals = enabled;
        self
    }

    pub fn parallel(mut self, enabled: bool) -> Self {
        self.mentions.parallel = enabled;
        self
    }

    pub fn min_parallel_drugs(mut self, min: usize) -> Self {
        self.mentions.min_parallel_drugs = min;
        self
    }

    /// Whether a scan over `drug_count` drugs should run on rayon
    pub fn scan_in_parallel(&self, drug_count: usize) -> bool {
        self.mentions.parallel && drug_count >= self.mentions.min_parallel_drugs
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.mentions.min_parallel_drugs == 0 {
            return Err(ConfigError::range_with_hint(
                "mentions.min_parallel_drugs",
                0,
                1,
                "Use 1 to always scan in parallel.",
            ));
        }
        Ok(())
    }

    /// Load a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            mentions: file.mentions.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            mentions: Some(self.mentions.clone()),
        };
        serde_yaml::to_string(&file).map_err(ConfigError::Yaml)
    }
}
