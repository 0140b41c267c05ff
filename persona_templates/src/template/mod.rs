//! Template definitions - the behavior entries of the catalog.

mod response;
mod triggers;

pub use response::*;
pub use triggers::*;

use serde::{Deserialize, Serialize};

/// Token estimate used when a template does not declare one.
pub const DEFAULT_TEMPLATE_TOKENS: u32 = 100;

fn default_template_tokens() -> u32 {
    DEFAULT_TEMPLATE_TOKENS
}

/// A behavior template in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Stable unique identifier (e.g. `ee_warm`).
    pub id: String,

    /// Semantic grouping (e.g. "Emotional Expression").
    pub category: String,

    /// User-facing label. Not unique across categories.
    pub ui_tag: String,

    /// Ranking weight; higher is more important.
    pub priority: i32,

    /// Opt-in only: never surfaced unless selected.
    #[serde(default)]
    pub requires_selection: bool,

    #[serde(default)]
    pub triggers: Triggers,

    #[serde(default)]
    pub emotion_responses: EmotionResponses,

    /// Coarse average cost, used before an emotion is known.
    #[serde(default = "default_template_tokens")]
    pub tokens: u32,
}

impl Template {
    /// Create a new template with no responses.
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        ui_tag: impl Into<String>,
        priority: i32,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            ui_tag: ui_tag.into(),
            priority,
            requires_selection: false,
            triggers: Triggers::none(),
            emotion_responses: EmotionResponses::new(),
            tokens: DEFAULT_TEMPLATE_TOKENS,
        }
    }

    /// Mark the template as opt-in only.
    pub fn with_requires_selection(mut self, requires: bool) -> Self {
        self.requires_selection = requires;
        self
    }

    /// Set trigger conditions.
    pub fn with_triggers(mut self, triggers: Triggers) -> Self {
        self.triggers = triggers;
        self
    }

    /// Add a response for an emotion label.
    pub fn with_response(mut self, emotion: impl Into<String>, response: EmotionResponse) -> Self {
        self.emotion_responses.insert(emotion, response);
        self
    }

    /// Set the coarse token estimate.
    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens = tokens;
        self
    }

    /// Whether the template is eligible without being selected.
    pub fn always_check(&self) -> bool {
        self.triggers.always_check
    }
}
