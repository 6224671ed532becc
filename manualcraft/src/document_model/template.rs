//! Reusable page templates

use super::page::PageContent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category marking templates saved by the user
///
/// Only templates in this category are persisted, deletable or editable in place.
pub const CUSTOM_CATEGORY: &str = "Custom";

/// A reusable page-content snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub page: PageContent,
}

impl Template {
    /// Whether this template was saved by the user
    pub fn is_custom(&self) -> bool {
        self.category == CUSTOM_CATEGORY
    }

    /// Overwrite name, category and tags
    pub fn apply_properties(&mut self, properties: &TemplateProperties) {
        self.name = properties.name.clone();
        self.category = properties.category.clone();
        self.tags = properties.tags.clone();
    }
}

/// Editable metadata of a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateProperties {
    pub name: String,
    pub category: String,
    pub tags: BTreeSet<String>,
}

impl TemplateProperties {
    /// Build properties from user input
    ///
    /// Names and tags are trimmed, empty tags dropped, and a blank category
    /// falls back to [`CUSTOM_CATEGORY`].
    pub fn new<I, S>(name: &str, category: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let category = category.trim();
        Self {
            name: name.trim().to_string(),
            category: if category.is_empty() {
                CUSTOM_CATEGORY.to_string()
            } else {
                category.to_string()
            },
            tags: tags
                .into_iter()
                .map(|tag| tag.as_ref().trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    /// Properties of a freshly saved user template
    pub fn custom<I, S>(name: &str, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(name, CUSTOM_CATEGORY, tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_normalize_input() {
        let props = TemplateProperties::new("  Cover  ", " ", [" intro", "", "cover ", "intro"]);
        assert_eq!(props.name, "Cover");
        assert_eq!(props.category, CUSTOM_CATEGORY);
        assert_eq!(props.tags.len(), 2);
        assert!(props.tags.contains("intro"));
    }

    #[test]
    fn test_tag_order_is_irrelevant() {
        let a: Template = serde_json::from_str(
            r#"{"id":"t","name":"T","category":"Custom","tags":["b","a"],"page":{}}"#,
        )
        .unwrap();
        let b: Template = serde_json::from_str(
            r#"{"id":"t","name":"T","category":"Custom","tags":["a","b"],"page":{}}"#,
        )
        .unwrap();
        assert_eq!(a, b);
        assert!(a.is_custom());
    }
}
