//! Embedded template definitions
//!
//! This module contains all built-in page templates compiled into the binary.
//! Built-in templates never use the custom category, so they are never
//! persisted, edited in place or deleted.

use crate::document_model::Template;

/// Built-in template source for display and lookup
#[derive(Debug, Clone)]
pub struct TemplateInfo {
    /// Template identifier (e.g., "builtin-cover-page")
    pub id: &'static str,
    /// Library category (e.g., "Layout")
    pub category: &'static str,
    /// Template TOML content
    pub content: &'static str,
}

/// Get all built-in template sources
///
/// # Returns
/// * `Vec<TemplateInfo>` - Vector of all built-in template definitions
pub fn get_all_templates() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo {
            id: "builtin-cover-page",
            category: "Layout",
            content: include_str!("templates/cover-page.toml"),
        },
        TemplateInfo {
            id: "builtin-specifications",
            category: "Reference",
            content: include_str!("templates/specifications.toml"),
        },
        TemplateInfo {
            id: "builtin-safety",
            category: "Safety",
            content: include_str!("templates/safety.toml"),
        },
        TemplateInfo {
            id: "builtin-troubleshooting",
            category: "Support",
            content: include_str!("templates/troubleshooting.toml"),
        },
    ]
}

/// Get a built-in template source by id or category
///
/// # Parameters
/// * `id` - Template identifier, or a category name in any case
///
/// # Returns
/// * `Some(TemplateInfo)` - Template information if found
/// * `None` - No template found matching the given identifier
pub fn get_template(id: &str) -> Option<TemplateInfo> {
    get_all_templates()
        .into_iter()
        .find(|t| t.id == id || t.category.eq_ignore_ascii_case(id))
}

/// Parse a template source into a [`Template`]
///
/// # Parameters
/// * `template_info` - Template information containing TOML content to parse
///
/// # Returns
/// * `Ok(Template)` - Successfully parsed template
/// * `Err(toml::de::Error)` - Error parsing TOML content
pub fn parse_template(template_info: &TemplateInfo) -> Result<Template, toml::de::Error> {
    toml::from_str(template_info.content)
}

/// Parse every built-in template
///
/// A template that fails to parse is logged and left out.
pub fn builtin_library() -> Vec<Template> {
    get_all_templates()
        .iter()
        .filter_map(|info| match parse_template(info) {
            Ok(template) => Some(template),
            Err(e) => {
                log::warn!("Skipping built-in template {}: {}", info.id, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::{ComponentType, CUSTOM_CATEGORY};

    #[test]
    fn test_all_templates_load() {
        let templates = get_all_templates();
        assert_eq!(templates.len(), 4);
        assert_eq!(builtin_library().len(), 4);
    }

    #[test]
    fn test_parse_templates() {
        for info in get_all_templates() {
            let parsed = parse_template(&info);
            assert!(parsed.is_ok(), "Failed to parse template: {}: {:?}", info.id, parsed.as_ref().err());
            let template = parsed.unwrap();
            assert_eq!(template.id, info.id);
            assert_eq!(template.category, info.category);
            assert!(template.page.component_count() > 0);
        }
    }

    #[test]
    fn test_builtins_are_not_custom() {
        for template in builtin_library() {
            assert_ne!(template.category, CUSTOM_CATEGORY);
            assert!(!template.is_custom());
        }
    }

    #[test]
    fn test_get_template_by_id_and_category() {
        assert!(get_template("builtin-safety").is_some());
        assert_eq!(get_template("support").map(|t| t.id), Some("builtin-troubleshooting"));
        assert!(get_template("unknown-template").is_none());
    }

    #[test]
    fn test_spanned_table_survives_parsing() {
        let info = get_template("builtin-troubleshooting").unwrap();
        let template = parse_template(&info).unwrap();
        let table = template
            .page
            .body
            .iter()
            .find(|c| c.component_type() == ComponentType::Table)
            .and_then(|c| c.props.as_table())
            .unwrap();
        assert_eq!(table.rows[0][0].rowspan, 2);
        assert_eq!(table.rows[1].len(), 3);
        let layout = table.layout();
        assert_eq!(layout.rows[1].len(), 2);
    }
}
