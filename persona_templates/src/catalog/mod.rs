//! Template catalog - read-only lookup over the template library.
//!
//! Templates are addressed three ways:
//! - **By id**: the stable identifier, always unique.
//! - **By (category, tag)**: the composite key, always unique.
//! - **By tag alone**: resolves to the tag's default category.
//!
//! A UI tag can legitimately appear under more than one category (for
//! example "Friendly" under "Social Energy" and under "Platonic Touch").
//! Unqualified lookups never pick among candidates at random:
//! - Tags listed in the *contextual* table are only reachable with their
//!   category and are excluded from the unqualified index.
//! - Any remaining tag shared by several categories must declare a default
//!   category, otherwise the catalog refuses to build.

mod loader;

pub use loader::*;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::CatalogError;
use crate::template::Template;

/// An immutable, validated collection of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    /// Templates in registration order.
    templates: Vec<Template>,

    /// Index: id -> template position.
    by_id: HashMap<String, usize>,

    /// Index: category -> ui_tag -> template position.
    by_category: HashMap<String, HashMap<String, usize>>,

    /// Index: ui_tag -> template position in its default category.
    by_tag: HashMap<String, usize>,

    /// (ui_tag, category) pairs that are only valid with their category.
    contextual: HashSet<(String, String)>,

    /// UI tags that appear under more than one category.
    shared: HashSet<String>,
}

impl TemplateCatalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Build a catalog from templates with no contextual entries or defaults.
    pub fn from_templates(
        templates: impl IntoIterator<Item = Template>,
    ) -> Result<Self, CatalogError> {
        Self::builder().with_templates(templates).build()
    }

    /// Resolve a UI tag to a template.
    ///
    /// With a category, the composite key is tried first. If that category
    /// has no such tag, the default mapping is used only for tags that exist
    /// under a single category; a shared tag never resolves to a category
    /// other than the one asked for. Without a category, only the default
    /// mapping is consulted, so contextual tags are not found.
    pub fn lookup_by_tag(&self, ui_tag: &str, category: Option<&str>) -> Option<&Template> {
        if let Some(category) = category {
            let qualified = self
                .by_category
                .get(category)
                .and_then(|tags| tags.get(ui_tag));
            if let Some(&index) = qualified {
                return self.templates.get(index);
            }

            if self.shared.contains(ui_tag) {
                tracing::debug!(ui_tag, category, "shared tag not found under requested category");
                return None;
            }
            tracing::debug!(ui_tag, category, "category miss, using tag's only category");
        }

        self.by_tag
            .get(ui_tag)
            .and_then(|&index| self.templates.get(index))
    }

    /// Get a template by its id.
    pub fn lookup_by_id(&self, id: &str) -> Option<&Template> {
        self.by_id.get(id).and_then(|&index| self.templates.get(index))
    }

    /// All tag names reachable without a category.
    pub fn all_tag_names(&self) -> BTreeSet<&str> {
        self.by_tag.keys().map(String::as_str).collect()
    }

    /// Check if a tag is reachable without a category.
    pub fn has_tag(&self, ui_tag: &str) -> bool {
        self.by_tag.contains_key(ui_tag)
    }

    /// Check if a tag is valid only because of the category it appears in.
    pub fn is_contextual(&self, ui_tag: &str, category: &str) -> bool {
        self.contextual
            .contains(&(ui_tag.to_string(), category.to_string()))
    }

    /// Get the category an unqualified lookup of this tag resolves to.
    pub fn default_category(&self, ui_tag: &str) -> Option<&str> {
        self.by_tag
            .get(ui_tag)
            .and_then(|&index| self.templates.get(index))
            .map(|t| t.category.as_str())
    }

    /// Category -> UI tags, for populating a selection UI.
    pub fn available_tags(&self) -> BTreeMap<String, Vec<String>> {
        let mut tags: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for template in &self.templates {
            tags.entry(template.category.clone())
                .or_default()
                .push(template.ui_tag.clone());
        }
        tags
    }

    /// Iterate over all templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Collects templates and lookup rules, then validates them into a catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    templates: Vec<Template>,
    contextual: Vec<(String, String)>,
    default_categories: BTreeMap<String, String>,
}

impl CatalogBuilder {
    /// Add a template.
    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.push(template);
        self
    }

    /// Add multiple templates.
    pub fn with_templates(mut self, templates: impl IntoIterator<Item = Template>) -> Self {
        self.templates.extend(templates);
        self
    }

    /// Declare a tag that is only valid under one category.
    pub fn with_contextual(mut self, ui_tag: impl Into<String>, category: impl Into<String>) -> Self {
        self.contextual.push((ui_tag.into(), category.into()));
        self
    }

    /// Declare which category an unqualified lookup of a shared tag uses.
    pub fn with_default_category(
        mut self,
        ui_tag: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        self.default_categories.insert(ui_tag.into(), category.into());
        self
    }

    /// Validate and index the collected templates.
    pub fn build(self) -> Result<TemplateCatalog, CatalogError> {
        let mut catalog = TemplateCatalog {
            templates: self.templates,
            ..TemplateCatalog::default()
        };

        for (index, template) in catalog.templates.iter().enumerate() {
            if !template.emotion_responses.is_empty() && !template.emotion_responses.has_default() {
                return Err(CatalogError::MissingDefaultResponse {
                    id: template.id.clone(),
                });
            }

            if catalog.by_id.insert(template.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId {
                    id: template.id.clone(),
                });
            }

            let tags = catalog
                .by_category
                .entry(template.category.clone())
                .or_default();
            if tags.insert(template.ui_tag.clone(), index).is_some() {
                return Err(CatalogError::DuplicateTag {
                    ui_tag: template.ui_tag.clone(),
                    category: template.category.clone(),
                });
            }
        }

        for (ui_tag, category) in self.contextual {
            let known = catalog
                .by_category
                .get(&category)
                .is_some_and(|tags| tags.contains_key(&ui_tag));
            if !known {
                return Err(CatalogError::UnknownContextualTag { ui_tag, category });
            }
            catalog.contextual.insert((ui_tag, category));
        }

        catalog.shared = catalog
            .templates
            .iter()
            .map(|t| t.ui_tag.as_str())
            .filter(|tag| {
                catalog
                    .by_category
                    .values()
                    .filter(|tags| tags.contains_key(*tag))
                    .count()
                    > 1
            })
            .map(str::to_string)
            .collect();

        // Group the unqualified candidates for each tag, keeping registration order.
        let mut candidates: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (index, template) in catalog.templates.iter().enumerate() {
            let key = (template.ui_tag.clone(), template.category.clone());
            if !catalog.contextual.contains(&key) {
                candidates.entry(template.ui_tag.as_str()).or_default().push(index);
            }
        }

        let mut by_tag = HashMap::new();
        for (ui_tag, indices) in candidates {
            let chosen = match self.default_categories.get(ui_tag) {
                Some(category) => indices
                    .iter()
                    .copied()
                    .find(|&i| catalog.templates[i].category == *category)
                    .ok_or_else(|| CatalogError::UnknownDefaultCategory {
                        ui_tag: ui_tag.to_string(),
                        category: category.clone(),
                    })?,
                None if indices.len() == 1 => indices[0],
                None => {
                    return Err(CatalogError::AmbiguousTag {
                        ui_tag: ui_tag.to_string(),
                        categories: indices
                            .iter()
                            .map(|&i| catalog.templates[i].category.clone())
                            .collect(),
                    })
                }
            };
            by_tag.insert(ui_tag.to_string(), chosen);
        }
        catalog.by_tag = by_tag;

        tracing::debug!(
            templates = catalog.templates.len(),
            tags = catalog.by_tag.len(),
            contextual = catalog.contextual.len(),
            "template catalog built"
        );

        Ok(catalog)
    }
}
