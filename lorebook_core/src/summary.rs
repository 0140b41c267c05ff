//! Summary and export utilities for lorebook documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::lorebook::{count_tags, Lorebook, SelectedTags};

/// Human-readable statistics about a lorebook, for UI display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LorebookSummary {
    pub character_name: String,
    pub companion_type: String,
    pub total_chunks: usize,
    pub total_tokens: u32,
    pub total_tags_selected: usize,
    /// Chunk category -> number of chunks.
    pub categories: BTreeMap<String, usize>,
    pub selected_tags: SelectedTags,
    pub version: String,
}

/// Summarize a lorebook.
pub fn summarize(lorebook: &Lorebook) -> LorebookSummary {
    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    for chunk in &lorebook.chunks {
        *categories.entry(chunk.category.clone()).or_default() += 1;
    }

    LorebookSummary {
        character_name: lorebook.character_name.clone(),
        companion_type: lorebook.companion_type.clone(),
        total_chunks: lorebook.chunks.len(),
        total_tokens: lorebook.total_tokens,
        total_tags_selected: count_tags(&lorebook.selected_tags),
        categories,
        selected_tags: lorebook.selected_tags.clone(),
        version: lorebook.version.clone(),
    }
}

/// Export a lorebook as indented JSON.
pub fn export_json(lorebook: &Lorebook) -> Result<String> {
    Ok(serde_json::to_string_pretty(lorebook)?)
}

/// Import a lorebook from JSON produced by [`export_json`].
pub fn import_json(json: &str) -> Result<Lorebook> {
    Ok(serde_json::from_str(json)?)
}

impl Lorebook {
    pub fn summary(&self) -> LorebookSummary {
        summarize(self)
    }

    pub fn to_json(&self) -> Result<String> {
        export_json(self)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        import_json(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LorebookError;
    use crate::generator::LorebookGenerator;
    use crate::lorebook::CustomChunkSpec;
    use persona_templates::{TemplateCatalog, Triggers};
    use std::sync::Arc;

    fn builtin_lorebook() -> Lorebook {
        let catalog = Arc::new(TemplateCatalog::builtin().unwrap());
        let generator = LorebookGenerator::with_defaults(catalog);

        let mut tags = SelectedTags::new();
        tags.insert(
            "Emotional Expression".to_string(),
            vec!["Warm".to_string(), "Expressive".to_string()],
        );
        tags.insert(
            "Platonic Touch".to_string(),
            vec!["Friendly".to_string()],
        );
        tags.insert("Core Values".to_string(), vec!["Honest".to_string()]);

        let custom = vec![
            CustomChunkSpec::new("Echo collects vinyl records"),
            CustomChunkSpec::new("Never talks about work on weekends")
                .with_id("weekends")
                .with_triggers(Triggers::always()),
        ];

        generator.generate("Echo", "Friend", &tags, &custom).unwrap()
    }

    #[test]
    fn test_summary() {
        let lorebook = builtin_lorebook();
        let summary = lorebook.summary();

        assert_eq!(summary.character_name, "Echo");
        assert_eq!(summary.companion_type, "Friend");
        assert_eq!(summary.total_chunks, 6);
        assert_eq!(summary.total_tags_selected, 4);
        assert_eq!(summary.total_tokens, lorebook.total_tokens);
        assert_eq!(summary.categories.get("Emotional Expression"), Some(&2));
        assert_eq!(summary.categories.get("Platonic Touch"), Some(&1));
        assert_eq!(summary.categories.get("custom"), Some(&2));
        assert_eq!(summary.version, "3.0");
    }

    #[test]
    fn test_export_import_round_trip() {
        let lorebook = builtin_lorebook();

        let json = export_json(&lorebook).unwrap();
        assert!(json.contains("\n  \"character_name\": \"Echo\""));
        assert!(json.contains("\"source\": \"custom\""));
        assert!(json.contains("\"source\": \"tag_matched\""));

        let imported = import_json(&json).unwrap();
        assert_eq!(imported, lorebook);
    }

    #[test]
    fn test_import_preserves_unknown_triggers() {
        let json = r#"{
            "character_name": "Echo",
            "companion_type": "Friend",
            "version": "3.0",
            "generation_method": "tag_based_v3",
            "selected_tags": {},
            "total_chunks": 1,
            "total_tokens": 20,
            "chunks": [{
                "id": "custom_0",
                "category": "custom",
                "priority": 50,
                "tokens": 20,
                "triggers": {"keywords": ["rain"]},
                "content": "Loves storms",
                "source": "custom"
            }],
            "metadata": {"tag_matched_count": 0, "custom_count": 1, "total_tags_selected": 0}
        }"#;

        let lorebook = Lorebook::from_json(json).unwrap();
        let again = Lorebook::from_json(&lorebook.to_json().unwrap()).unwrap();
        assert_eq!(again, lorebook);
        assert!(again.chunks[0].triggers.extra.contains_key("keywords"));
    }

    #[test]
    fn test_import_invalid_json() {
        let result = import_json("{\"character_name\": 5}");
        assert!(matches!(result, Err(LorebookError::Json(_))));
    }
}
