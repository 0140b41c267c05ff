//! Lorebook Generator - turns UI tag selections into a lorebook document.
//!
//! Generation works as follows:
//! 1. **Resolve**: Each (category, tag) pair is looked up in the catalog
//! 2. **Match**: Every resolved template becomes a template-backed chunk
//! 3. **Merge**: User-authored chunks are appended with defaults filled in
//! 4. **Assemble**: Derived totals are computed and the document is returned
//!
//! Unknown tags are logged and skipped; generation only fails when a custom
//! chunk is missing its content.

mod validation;

pub use validation::*;

use persona_templates::TemplateCatalog;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::error::{LorebookError, Result};
use crate::lorebook::{count_tags, Chunk, ChunkBody, CustomChunkSpec, Lorebook, SelectedTags};

/// Builds lorebooks from an injected, read-only template catalog.
#[derive(Debug, Clone)]
pub struct LorebookGenerator {
    catalog: Arc<TemplateCatalog>,
    config: GeneratorConfig,
}

impl LorebookGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(catalog: Arc<TemplateCatalog>, config: GeneratorConfig) -> Self {
        Self { catalog, config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults(catalog: Arc<TemplateCatalog>) -> Self {
        Self::new(catalog, GeneratorConfig::default())
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Generate a complete lorebook from tag selections and custom chunks.
    pub fn generate(
        &self,
        character_name: &str,
        companion_type: &str,
        selected_tags: &SelectedTags,
        custom_chunks: &[CustomChunkSpec],
    ) -> Result<Lorebook> {
        let mut chunks = Vec::new();

        for (category, tags) in selected_tags {
            for tag in tags {
                match self.catalog.lookup_by_tag(tag, Some(category.as_str())) {
                    Some(template) => chunks.push(Chunk::from_template(template, category.as_str())),
                    None => warn!(tag = %tag, category = %category, "no template found for tag"),
                }
            }
        }

        debug!(
            matched = chunks.len(),
            selected = count_tags(selected_tags),
            "matched templates from selected tags"
        );

        for (index, spec) in custom_chunks.iter().enumerate() {
            let chunk = self.custom_chunk(index, spec, chunks.len())?;
            chunks.push(chunk);
        }

        let lorebook = Lorebook::assemble(
            character_name,
            companion_type,
            self.config.version.as_str(),
            self.config.generation_method.as_str(),
            selected_tags.clone(),
            chunks,
        );

        info!(
            character = %lorebook.character_name,
            chunks = lorebook.total_chunks,
            tokens = lorebook.total_tokens,
            tags = lorebook.metadata.total_tags_selected,
            "generated lorebook"
        );

        Ok(lorebook)
    }

    /// Regenerate a lorebook for a new selection, keeping its custom chunks.
    ///
    /// Every template-backed chunk is rebuilt from `selected_tags`; custom
    /// chunks are carried over exactly as they were.
    pub fn regenerate(&self, existing: &Lorebook, selected_tags: &SelectedTags) -> Result<Lorebook> {
        let custom_chunks: Vec<CustomChunkSpec> = existing
            .custom_chunks()
            .filter_map(Chunk::to_custom_spec)
            .collect();

        debug!(
            character = %existing.character_name,
            preserved = custom_chunks.len(),
            "regenerating lorebook"
        );

        self.generate(
            &existing.character_name,
            &existing.companion_type,
            selected_tags,
            &custom_chunks,
        )
    }

    /// Check a selection against the catalog without generating anything.
    pub fn validate_tags(&self, selected_tags: &SelectedTags) -> TagValidation {
        validate_tags(&self.catalog, selected_tags)
    }

    /// Fill in defaults for a custom chunk appended after `position` chunks.
    fn custom_chunk(&self, index: usize, spec: &CustomChunkSpec, position: usize) -> Result<Chunk> {
        let content = spec
            .content
            .clone()
            .ok_or(LorebookError::MissingCustomContent { index })?;

        Ok(Chunk {
            id: spec
                .id
                .clone()
                .unwrap_or_else(|| format!("custom_{}", position)),
            category: spec
                .category
                .clone()
                .unwrap_or_else(|| self.config.custom_category.clone()),
            priority: spec.priority.unwrap_or(self.config.custom_priority),
            tokens: spec.tokens.unwrap_or(self.config.custom_tokens),
            triggers: spec.triggers.clone().unwrap_or_default(),
            body: ChunkBody::Custom { content },
        })
    }
}
