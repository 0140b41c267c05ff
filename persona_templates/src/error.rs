//! Errors raised while building a template catalog.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse template catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read template catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate template id '{id}'")]
    DuplicateId { id: String },

    #[error("duplicate tag '{ui_tag}' in category '{category}'")]
    DuplicateTag { ui_tag: String, category: String },

    #[error("template '{id}' has emotion responses but no \"default\" entry")]
    MissingDefaultResponse { id: String },

    #[error("tag '{ui_tag}' appears in categories {categories:?} and has no default category")]
    AmbiguousTag {
        ui_tag: String,
        categories: Vec<String>,
    },

    #[error("default category '{category}' for tag '{ui_tag}' has no matching template")]
    UnknownDefaultCategory { ui_tag: String, category: String },

    #[error("contextual tag '{ui_tag}' in category '{category}' has no matching template")]
    UnknownContextualTag { ui_tag: String, category: String },
}
