//! Chunk definitions - the entries of a lorebook document.

use persona_templates::{EmotionResponses, Template, Triggers};
use serde::{Deserialize, Deserializer, Serialize};

/// Where a chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkSource {
    /// Generated from a template matched by a selected tag.
    TagMatched,
    /// Written by the user.
    Custom,
}

/// A single lorebook entry.
///
/// Template-backed chunks keep the full emotion response table and are only
/// rendered at retrieval time. Custom chunks carry fixed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub category: String,
    pub priority: i32,

    /// Flat cost estimate, independent of any emotion.
    pub tokens: u32,

    #[serde(default)]
    pub triggers: Triggers,

    #[serde(flatten)]
    pub body: ChunkBody,
}

/// Source-specific payload, tagged by `source` in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ChunkBody {
    TagMatched {
        #[serde(default)]
        emotion_responses: EmotionResponses,

        #[serde(default, deserialize_with = "null_as_default")]
        ui_tag: String,

        /// Category key the tag was selected under.
        #[serde(default, deserialize_with = "null_as_default")]
        ui_category: String,

        #[serde(default)]
        requires_selection: bool,
    },
    Custom {
        content: String,
    },
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Chunk {
    /// Build a template-backed chunk for a tag selected under `ui_category`.
    pub fn from_template(template: &Template, ui_category: impl Into<String>) -> Self {
        Self {
            id: template.id.clone(),
            category: template.category.clone(),
            priority: template.priority,
            tokens: template.tokens,
            triggers: template.triggers.clone(),
            body: ChunkBody::TagMatched {
                emotion_responses: template.emotion_responses.clone(),
                ui_tag: template.ui_tag.clone(),
                ui_category: ui_category.into(),
                requires_selection: template.requires_selection,
            },
        }
    }

    pub fn source(&self) -> ChunkSource {
        match self.body {
            ChunkBody::TagMatched { .. } => ChunkSource::TagMatched,
            ChunkBody::Custom { .. } => ChunkSource::Custom,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.body, ChunkBody::Custom { .. })
    }

    /// Custom chunks and `always_check` chunks bypass ranking and budget.
    pub fn is_always_include(&self) -> bool {
        self.is_custom() || self.triggers.always_check
    }

    /// Whether the chunk stays inert until selected.
    pub fn requires_selection(&self) -> bool {
        match &self.body {
            ChunkBody::TagMatched {
                requires_selection, ..
            } => *requires_selection,
            ChunkBody::Custom { .. } => false,
        }
    }

    /// The UI tag of a template-backed chunk.
    pub fn ui_tag(&self) -> Option<&str> {
        match &self.body {
            ChunkBody::TagMatched { ui_tag, .. } if !ui_tag.is_empty() => Some(ui_tag.as_str()),
            _ => None,
        }
    }

    /// Convert a custom chunk back into the input shape, with every field set.
    pub fn to_custom_spec(&self) -> Option<CustomChunkSpec> {
        match &self.body {
            ChunkBody::Custom { content } => Some(CustomChunkSpec {
                id: Some(self.id.clone()),
                category: Some(self.category.clone()),
                priority: Some(self.priority),
                tokens: Some(self.tokens),
                triggers: Some(self.triggers.clone()),
                content: Some(content.clone()),
            }),
            ChunkBody::TagMatched { .. } => None,
        }
    }
}

/// A user-authored chunk as supplied by a caller.
///
/// Only `content` is required; the generator fills in the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomChunkSpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub tokens: Option<u32>,
    #[serde(default)]
    pub triggers: Option<Triggers>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CustomChunkSpec {
    /// Create a spec with just content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn with_triggers(mut self, triggers: Triggers) -> Self {
        self.triggers = Some(triggers);
        self
    }
}
