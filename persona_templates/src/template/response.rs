//! Emotion responses - how a template behaves under a given emotion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the fallback response every non-empty response table must carry.
pub const DEFAULT_EMOTION: &str = "default";

/// A single emotion-specific behavior directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EmotionResponse {
    /// How the character should sound.
    #[serde(default)]
    pub tone: String,

    /// What the character should do.
    #[serde(default)]
    pub action: String,

    /// Token cost of this specific response once rendered.
    #[serde(default)]
    pub tokens: u32,
}

impl EmotionResponse {
    /// Create a new emotion response.
    pub fn new(tone: impl Into<String>, action: impl Into<String>, tokens: u32) -> Self {
        Self {
            tone: tone.into(),
            action: action.into(),
            tokens,
        }
    }
}

/// Emotion label -> response table.
///
/// Iteration order is the lexical order of emotion labels, so the "first"
/// entry is always the same for a given table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EmotionResponses(BTreeMap<String, EmotionResponse>);

impl EmotionResponses {
    /// Create an empty response table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for an emotion label.
    pub fn with(mut self, emotion: impl Into<String>, response: EmotionResponse) -> Self {
        self.0.insert(emotion.into(), response);
        self
    }

    /// Insert or replace the response for an emotion label.
    pub fn insert(&mut self, emotion: impl Into<String>, response: EmotionResponse) {
        self.0.insert(emotion.into(), response);
    }

    /// Get the response for an exact emotion label.
    pub fn get(&self, emotion: &str) -> Option<&EmotionResponse> {
        self.0.get(emotion)
    }

    /// Get the `"default"` response.
    pub fn default_response(&self) -> Option<&EmotionResponse> {
        self.0.get(DEFAULT_EMOTION)
    }

    /// Whether a `"default"` response is present.
    pub fn has_default(&self) -> bool {
        self.0.contains_key(DEFAULT_EMOTION)
    }

    /// The first entry in iteration order.
    pub fn first(&self) -> Option<(&str, &EmotionResponse)> {
        self.0.iter().next().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over all (emotion, response) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EmotionResponse)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve which response applies for an emotion signal.
    ///
    /// Tries `primary` first, then each `fallbacks` label in the order given,
    /// then `"default"`. Returns the matched key alongside the response, or
    /// `None` when the table has none of them.
    pub fn resolve<'a, I>(&self, primary: &str, fallbacks: I) -> Option<(&str, &EmotionResponse)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if let Some((key, response)) = self.0.get_key_value(primary) {
            return Some((key.as_str(), response));
        }

        for label in fallbacks {
            if let Some((key, response)) = self.0.get_key_value(label) {
                return Some((key.as_str(), response));
            }
        }

        self.0
            .get_key_value(DEFAULT_EMOTION)
            .map(|(key, response)| (key.as_str(), response))
    }
}

impl FromIterator<(String, EmotionResponse)> for EmotionResponses {
    fn from_iter<T: IntoIterator<Item = (String, EmotionResponse)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
