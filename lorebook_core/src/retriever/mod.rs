//! Lorebook Retriever - selects and renders behavior for the current turn.
//!
//! Retrieval works as follows:
//! 1. **Eligibility**: Drop template-backed chunks that are opt-in and unselected
//! 2. **Resolution**: Each chunk picks its response (primary -> ranked -> default)
//! 3. **Rendering**: The response's tone and action become the chunk content
//! 4. **Ranking**: Always-include chunks pass through; the rest are ranked by
//!    priority and cut to `max_chunks`
//!
//! The retriever keeps no per-turn state. Every call receives the full query,
//! so concurrent retrievals against one lorebook need no coordination.

mod estimate;
mod preview;
mod render;

pub use estimate::*;
pub use preview::*;
pub use render::*;

use persona_templates::TemplateCatalog;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::config::RetrieverConfig;
use crate::lorebook::{Chunk, ChunkSource, Lorebook};

/// A secondary emotion reported by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub score: f32,
}

impl EmotionScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Per-turn input to a retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalQuery {
    /// The user's raw message. Carried for context; not matched against.
    pub user_message: String,

    /// Primary emotion label.
    pub emotion: String,

    /// Secondary emotions, descending by score.
    pub top_emotions: Vec<EmotionScore>,

    /// Active template ids or UI tags.
    pub selected_tags: HashSet<String>,

    /// Ceiling on ranked chunks; always-include chunks do not count.
    pub max_chunks: usize,
}

impl RetrievalQuery {
    /// Create a query for an emotion with the default chunk ceiling.
    pub fn new(emotion: impl Into<String>) -> Self {
        Self {
            user_message: String::new(),
            emotion: emotion.into(),
            top_emotions: Vec::new(),
            selected_tags: HashSet::new(),
            max_chunks: RetrieverConfig::default().max_chunks,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.user_message = message.into();
        self
    }

    pub fn with_top_emotions(mut self, top_emotions: Vec<EmotionScore>) -> Self {
        self.top_emotions = top_emotions;
        self
    }

    /// Add active template ids or UI tags.
    pub fn with_selected_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }
}

/// A chunk resolved and rendered for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedChunk {
    pub id: String,
    pub category: String,
    pub priority: i32,
    pub source: ChunkSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_tag: Option<String>,

    /// Text to inject into the prompt.
    pub content: String,

    /// Cost of the response actually rendered.
    pub tokens: u32,

    /// The chunk's flat estimate, kept alongside the actual cost.
    pub estimated_tokens: u32,

    /// Emotion key the response was resolved from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

/// Whether a chunk may be surfaced for the given selection.
///
/// Custom chunks, `always_check` chunks and chunks that do not require
/// selection are always eligible. Everything else must be selected by id or
/// by UI tag.
pub fn is_eligible(chunk: &Chunk, selected_tags: &HashSet<String>) -> bool {
    chunk.is_always_include()
        || !chunk.requires_selection()
        || selected_tags.contains(&chunk.id)
        || chunk
            .ui_tag()
            .is_some_and(|tag| selected_tags.contains(tag))
}

/// Retrieves rendered behavior from lorebooks.
#[derive(Debug, Clone)]
pub struct LorebookRetriever {
    catalog: Arc<TemplateCatalog>,
    config: RetrieverConfig,
}

impl LorebookRetriever {
    /// Create a new retriever with the given configuration.
    pub fn new(catalog: Arc<TemplateCatalog>, config: RetrieverConfig) -> Self {
        Self { catalog, config }
    }

    /// Create a retriever with default configuration.
    pub fn with_defaults(catalog: Arc<TemplateCatalog>) -> Self {
        Self::new(catalog, RetrieverConfig::default())
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Start a query using this retriever's chunk ceiling.
    pub fn query(&self, emotion: impl Into<String>) -> RetrievalQuery {
        RetrievalQuery::new(emotion).with_max_chunks(self.config.max_chunks)
    }

    /// Select and render the chunks to inject for this turn.
    ///
    /// Returns always-include chunks in lorebook order, followed by at most
    /// `max_chunks` others by descending priority (ties keep lorebook order).
    /// Total token cost is not capped.
    pub fn retrieve(&self, lorebook: &Lorebook, query: &RetrievalQuery) -> Vec<RenderedChunk> {
        let fallbacks = ranked_labels(&query.top_emotions);

        let mut always = Vec::new();
        let mut others = Vec::new();

        for chunk in &lorebook.chunks {
            if !is_eligible(chunk, &query.selected_tags) {
                continue;
            }

            let rendered = render_chunk(chunk, &query.emotion, &fallbacks);
            if chunk.is_always_include() {
                always.push(rendered);
            } else {
                others.push(rendered);
            }
        }

        let eligible = always.len() + others.len();

        // Stable sort: equal priorities stay in lorebook order.
        others.sort_by(|a, b| b.priority.cmp(&a.priority));
        others.truncate(query.max_chunks);

        let mut result = always;
        result.extend(others);

        debug!(
            character = %lorebook.character_name,
            emotion = %query.emotion,
            eligible,
            returned = result.len(),
            tokens = result.iter().map(|c| c.tokens).fold(0u32, u32::saturating_add),
            "retrieved lorebook chunks"
        );

        result
    }

    /// Estimate retrieval size from flat token estimates.
    pub fn estimate_retrieval_size(&self, lorebook: &Lorebook, max_chunks: usize) -> RetrievalEstimate {
        estimate_retrieval_size(lorebook, self.config.typical_chunks, max_chunks)
    }

    /// Preview what a tag will do, or `None` if the tag is unknown.
    pub fn get_tag_preview(&self, ui_tag: &str, category: Option<&str>) -> Option<String> {
        self.catalog
            .lookup_by_tag(ui_tag, category)
            .map(|template| preview_template(template, self.config.preview_limit))
    }
}
