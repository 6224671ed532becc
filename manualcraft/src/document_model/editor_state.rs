//! The complete snapshot of one editing session

use super::assets::Assets;
use super::component::Component;
use super::ids::new_id;
use super::page::{Page, Section};
use super::settings::DocumentSettings;
use super::template::Template;
use super::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Grid size of a new session
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Everything describing one editing session
///
/// Fields missing from stored documents take their initial-state values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorState {
    /// Project or template display name
    pub project_name: String,
    pub pages: Vec<Page>,
    pub current_page_index: usize,
    /// Must be `None` or a component on the current page
    pub selected_component_id: Option<String>,
    pub grid_size: f64,
    pub is_grid_visible: bool,
    pub is_snap_to_grid_enabled: bool,
    /// Templates available to this session
    pub templates: Vec<Template>,
    pub assets: Assets,
    pub document_settings: DocumentSettings,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            pages: Vec::new(),
            current_page_index: 0,
            selected_component_id: None,
            grid_size: DEFAULT_GRID_SIZE,
            is_grid_visible: true,
            is_snap_to_grid_enabled: true,
            templates: Vec::new(),
            assets: Assets::default(),
            document_settings: DocumentSettings::default(),
        }
    }
}

impl EditorState {
    /// A session with the given name, pages and template list
    pub fn with_pages(
        project_name: impl Into<String>,
        pages: Vec<Page>,
        templates: Vec<Template>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            pages,
            templates,
            ..Self::default()
        }
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current_page_index)
    }

    pub fn current_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.get_mut(self.current_page_index)
    }

    /// Find a component on the current page
    pub fn find_component(&self, id: &str) -> Option<(Section, &Component)> {
        self.current_page()?.content.find(id)
    }

    pub fn find_component_mut(&mut self, id: &str) -> Option<&mut Component> {
        self.current_page_mut()?.content.find_mut(id)
    }

    pub fn selected_component(&self) -> Option<&Component> {
        let id = self.selected_component_id.as_deref()?;
        self.find_component(id).map(|(_, component)| component)
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Check the structural invariants of the state
    ///
    /// # Returns
    /// * `Ok(())` - At least one page, the page index is in range, the selection resolves and component ids are unique per page
    /// * `Err(ValidationError)` - One or more invariants are violated
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.pages.is_empty() {
            errors.push(ValidationError::NoPages);
        } else if self.current_page_index >= self.pages.len() {
            errors.push(ValidationError::PageIndexOutOfRange {
                index: self.current_page_index,
                page_count: self.pages.len(),
            });
        }

        if let Some(id) = &self.selected_component_id {
            if self.find_component(id).is_none() {
                errors.push(ValidationError::DanglingSelection {
                    component_id: id.clone(),
                });
            }
        }

        for page in &self.pages {
            let mut seen = HashSet::new();
            for component in page.content.components() {
                if !seen.insert(component.id.as_str()) {
                    errors.push(ValidationError::DuplicateComponentId {
                        page_id: page.id.clone(),
                        component_id: component.id.clone(),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }

    /// Repair a loaded state so the editing invariants hold
    ///
    /// Adds a blank page when there is none, clamps the page index and drops
    /// a selection that no longer resolves.
    pub fn normalize(&mut self) {
        if self.pages.is_empty() {
            log::warn!("Document '{}' has no pages, adding a blank page", self.project_name);
            self.pages.push(Page::blank(new_id("page"), "Page 1"));
        }
        if self.current_page_index >= self.pages.len() {
            self.current_page_index = self.pages.len() - 1;
        }
        if let Some(id) = self.selected_component_id.clone() {
            if self.find_component(&id).is_none() {
                self.selected_component_id = None;
            }
        }
    }
}
