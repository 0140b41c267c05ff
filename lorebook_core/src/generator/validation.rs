//! Pre-flight validation of tag selections.

use persona_templates::TemplateCatalog;
use serde::{Deserialize, Serialize};

use crate::lorebook::SelectedTags;

/// Outcome of validating a tag selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValidation {
    /// One message per offending (tag, category) pair.
    pub errors: Vec<String>,
}

impl TagValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Split into the `(valid, errors)` pair.
    pub fn into_parts(self) -> (bool, Vec<String>) {
        (self.errors.is_empty(), self.errors)
    }
}

/// Check every selected tag against the catalog.
///
/// A tag passes if it is reachable without a category, or if the catalog
/// lists it as valid under the category it was selected in. Never fails;
/// problems are reported in the returned error list.
pub fn validate_tags(catalog: &TemplateCatalog, selected_tags: &SelectedTags) -> TagValidation {
    let mut errors = Vec::new();

    for (category, tags) in selected_tags {
        for tag in tags {
            if !catalog.has_tag(tag) && !catalog.is_contextual(tag, category) {
                errors.push(format!("Invalid tag '{}' in category '{}'", tag, category));
            }
        }
    }

    TagValidation { errors }
}
