//! Errors raised by the lorebook engine.

use persona_templates::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LorebookError {
    /// A user-authored chunk arrived without its `content`.
    #[error("custom chunk #{index} is missing required field 'content'")]
    MissingCustomContent { index: usize },

    #[error("lorebook JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse engine config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read engine config: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type Result<T, E = LorebookError> = std::result::Result<T, E>;
