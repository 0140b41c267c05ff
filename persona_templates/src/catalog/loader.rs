//! TOML catalog files and the bundled built-in catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{CatalogBuilder, TemplateCatalog};
use crate::error::CatalogError;
use crate::template::Template;

const BUILTIN_CATALOG: &str = include_str!("../../data/templates.toml");

/// A (tag, category) pair that is only valid under that category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextualTag {
    pub ui_tag: String,
    pub category: String,
}

/// On-disk shape of a template catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub templates: Vec<Template>,

    #[serde(default)]
    pub contextual: Vec<ContextualTag>,

    /// ui_tag -> category used for unqualified lookups of shared tags.
    #[serde(default)]
    pub default_categories: BTreeMap<String, String>,
}

impl CatalogFile {
    /// Turn the file contents into a catalog builder.
    pub fn into_builder(self) -> CatalogBuilder {
        let mut builder = TemplateCatalog::builder().with_templates(self.templates);
        for entry in self.contextual {
            builder = builder.with_contextual(entry.ui_tag, entry.category);
        }
        for (ui_tag, category) in self.default_categories {
            builder = builder.with_default_category(ui_tag, category);
        }
        builder
    }
}

impl TemplateCatalog {
    /// Parse a catalog from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        file.into_builder().build()
    }

    /// Load a catalog from a TOML file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading template catalog");
        Self::from_toml_str(&source)
    }

    /// The catalog bundled with this crate.
    ///
    /// "Friendly", "Reserved", "Affectionate" and "No Touch" under
    /// "Platonic Touch" are contextual. Unqualified, "Friendly" resolves to
    /// "Social Energy", "Reserved" to "Emotional Expression" and
    /// "Affectionate" to "How They Care".
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::DEFAULT_EMOTION;

    #[test]
    fn test_from_toml_str() {
        let source = r#"
            [[templates]]
            id = "ee_calm"
            category = "Emotional Expression"
            ui_tag = "Calm"
            priority = 70
            tokens = 40

            [templates.triggers]
            always_check = true

            [templates.emotion_responses.default]
            tone = "steady"
            action = "breathes slowly"
            tokens = 25

            [[templates]]
            id = "pt_calm"
            category = "Platonic Touch"
            ui_tag = "Calm"
            priority = 10

            [[contextual]]
            ui_tag = "Calm"
            category = "Platonic Touch"
        "#;

        let catalog = TemplateCatalog::from_toml_str(source).unwrap();
        assert_eq!(catalog.len(), 2);

        let calm = catalog.lookup_by_tag("Calm", None).unwrap();
        assert_eq!(calm.id, "ee_calm");
        assert!(calm.always_check());
        assert_eq!(calm.emotion_responses.get(DEFAULT_EMOTION).unwrap().tokens, 25);

        let touch = catalog.lookup_by_id("pt_calm").unwrap();
        assert_eq!(touch.tokens, crate::template::DEFAULT_TEMPLATE_TOKENS);
    }

    #[test]
    fn test_malformed_toml() {
        let result = TemplateCatalog::from_toml_str("[[templates]]\nid = ");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = TemplateCatalog::load("/nonexistent/templates.toml");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = TemplateCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());

        let warm = catalog.lookup_by_tag("Warm", None).unwrap();
        assert_eq!(warm.id, "ee_warm");
        assert!(warm.requires_selection);
        for emotion in ["sadness", "joy", DEFAULT_EMOTION] {
            assert!(warm.emotion_responses.get(emotion).is_some(), "{}", emotion);
        }

        assert_eq!(catalog.lookup_by_tag("Reserved", None).unwrap().id, "ee_reserved");
        assert_eq!(
            catalog
                .lookup_by_tag("Reserved", Some("Platonic Touch"))
                .unwrap()
                .id,
            "pt_reserved"
        );
        assert_eq!(catalog.default_category("Friendly"), Some("Social Energy"));
        assert_eq!(catalog.default_category("Affectionate"), Some("How They Care"));
        assert!(catalog.lookup_by_tag("No Touch", None).is_none());
    }

    #[test]
    fn test_builtin_templates_all_have_default() {
        let catalog = TemplateCatalog::builtin().unwrap();
        for template in catalog.iter() {
            assert!(
                template.emotion_responses.has_default(),
                "{} has no default response",
                template.id
            );
        }
    }
}
