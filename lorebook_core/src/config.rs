//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Version stamped on generated documents.
pub const LOREBOOK_VERSION: &str = "3.0";

/// Generation method stamped on generated documents.
pub const GENERATION_METHOD: &str = "tag_based_v3";

/// Configuration for both halves of the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub generator: GeneratorConfig,
    pub retriever: RetrieverConfig,
}

impl EngineConfig {
    /// Parse configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Defaults applied while generating documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Category given to custom chunks that do not name one.
    pub custom_category: String,

    /// Priority given to custom chunks that do not set one.
    pub custom_priority: i32,

    /// Token estimate given to custom chunks that do not set one.
    pub custom_tokens: u32,

    pub version: String,

    pub generation_method: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            custom_category: "custom".to_string(),
            custom_priority: 50,
            custom_tokens: 100,
            version: LOREBOOK_VERSION.to_string(),
            generation_method: GENERATION_METHOD.to_string(),
        }
    }
}

/// Limits applied while retrieving and previewing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    /// Ceiling on ranked (non always-include) chunks per turn.
    pub max_chunks: usize,

    /// How many ranked chunks the "typical" size estimate assumes.
    pub typical_chunks: usize,

    /// Maximum characters in a tag preview before it is cut.
    pub preview_limit: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            max_chunks: 7,
            typical_chunks: 5,
            preview_limit: 150,
        }
    }
}
