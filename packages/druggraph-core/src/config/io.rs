//! Configuration file schema
//!
//! The on-disk YAML layout. Loading and validation live in
//! `builder_config.rs`.

use serde::{Deserialize, Serialize};

use super::builder_config::MentionConfig;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1); optional here so a missing value
    /// can be reported precisely
    #[serde(default)]
    pub version: Option<u32>,

    /// Mention detection settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentions: Option<MentionConfig>,
}
