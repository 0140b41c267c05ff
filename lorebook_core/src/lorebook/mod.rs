//! Lorebook module - the persisted document produced by the generator.
//!
//! A lorebook consists of:
//! - **Identity**: character name, companion type, version, generation method
//! - **Selection**: the category -> tags mapping it was generated from
//! - **Chunks**: template-backed and custom entries, in generation order
//! - **Derived counts**: recomputed on every generation, never edited by hand

mod chunk;

pub use chunk::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category -> selected UI tags.
pub type SelectedTags = BTreeMap<String, Vec<String>>;

/// Counts describing how a lorebook was put together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LorebookMetadata {
    pub tag_matched_count: usize,
    pub custom_count: usize,
    pub total_tags_selected: usize,
}

/// A character's generated lorebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lorebook {
    pub character_name: String,
    pub companion_type: String,
    pub version: String,
    pub generation_method: String,

    /// The selection that produced this document.
    pub selected_tags: SelectedTags,

    pub total_chunks: usize,

    /// Sum of each chunk's flat token estimate.
    pub total_tokens: u32,

    pub chunks: Vec<Chunk>,

    pub metadata: LorebookMetadata,
}

impl Lorebook {
    /// Assemble a document and compute its derived fields.
    pub(crate) fn assemble(
        character_name: impl Into<String>,
        companion_type: impl Into<String>,
        version: impl Into<String>,
        generation_method: impl Into<String>,
        selected_tags: SelectedTags,
        chunks: Vec<Chunk>,
    ) -> Self {
        let tag_matched_count = chunks.iter().filter(|c| !c.is_custom()).count();
        let custom_count = chunks.len() - tag_matched_count;
        let total_tags_selected = count_tags(&selected_tags);

        Self {
            character_name: character_name.into(),
            companion_type: companion_type.into(),
            version: version.into(),
            generation_method: generation_method.into(),
            selected_tags,
            total_chunks: chunks.len(),
            total_tokens: chunks.iter().map(|c| c.tokens).fold(0, u32::saturating_add),
            chunks,
            metadata: LorebookMetadata {
                tag_matched_count,
                custom_count,
                total_tags_selected,
            },
        }
    }

    /// Get a chunk by id.
    pub fn get_chunk(&self, id: &str) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.id == id)
    }

    /// All user-authored chunks, in document order.
    pub fn custom_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|c| c.is_custom())
    }

    /// All template-backed chunks, in document order.
    pub fn tag_matched_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|c| !c.is_custom())
    }
}

/// Total number of tags across all categories.
pub fn count_tags(selected_tags: &SelectedTags) -> usize {
    selected_tags.values().map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_templates::Triggers;

    fn custom(id: &str, tokens: u32) -> Chunk {
        Chunk {
            id: id.to_string(),
            category: "custom".to_string(),
            priority: 50,
            tokens,
            triggers: Triggers::none(),
            body: ChunkBody::Custom {
                content: format!("{} content", id),
            },
        }
    }

    fn tagged(id: &str, tokens: u32) -> Chunk {
        Chunk {
            id: id.to_string(),
            category: "Core Values".to_string(),
            priority: 60,
            tokens,
            triggers: Triggers::none(),
            body: ChunkBody::TagMatched {
                emotion_responses: Default::default(),
                ui_tag: "Honest".to_string(),
                ui_category: "Core Values".to_string(),
                requires_selection: true,
            },
        }
    }

    #[test]
    fn test_assemble_derives_counts() {
        let mut selected = SelectedTags::new();
        selected.insert("Core Values".to_string(), vec!["Honest".to_string(), "Bogus".to_string()]);

        let lorebook = Lorebook::assemble(
            "Echo",
            "friend",
            "3.0",
            "tag_based_v3",
            selected,
            vec![tagged("cv_honest", 38), custom("custom_1", 100)],
        );

        assert_eq!(lorebook.total_chunks, 2);
        assert_eq!(lorebook.total_tokens, 138);
        assert_eq!(lorebook.metadata.tag_matched_count, 1);
        assert_eq!(lorebook.metadata.custom_count, 1);
        assert_eq!(lorebook.metadata.total_tags_selected, 2);
    }

    #[test]
    fn test_chunk_accessors() {
        let lorebook = Lorebook::assemble(
            "Echo",
            "friend",
            "3.0",
            "tag_based_v3",
            SelectedTags::new(),
            vec![custom("a", 1), tagged("b", 2), custom("c", 3)],
        );

        let custom_ids: Vec<_> = lorebook.custom_chunks().map(|c| c.id.as_str()).collect();
        assert_eq!(custom_ids, vec!["a", "c"]);
        assert_eq!(lorebook.tag_matched_chunks().count(), 1);
        assert_eq!(lorebook.get_chunk("b").unwrap().tokens, 2);
        assert!(lorebook.get_chunk("z").is_none());
    }
}
