//! Trigger conditions attached to templates and chunks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named conditions that make a template eligible regardless of selection.
///
/// `always_check` is the only condition the engine acts on. Any other keys
/// are carried through untouched so documents round-trip without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Triggers {
    #[serde(default, skip_serializing_if = "is_false")]
    pub always_check: bool,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Triggers {
    /// Triggers with nothing set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Triggers that always mark the owner as eligible.
    pub fn always() -> Self {
        Self {
            always_check: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.always_check && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_triggers_serialize_as_empty_object() {
        let json = serde_json::to_string(&Triggers::none()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_unknown_keys_survive() {
        let triggers: Triggers =
            serde_json::from_str(r#"{"always_check": true, "keywords": ["rain"]}"#).unwrap();
        assert!(triggers.always_check);
        assert!(triggers.extra.contains_key("keywords"));

        let back: Triggers =
            serde_json::from_str(&serde_json::to_string(&triggers).unwrap()).unwrap();
        assert_eq!(back, triggers);
    }
}
