//! Mutation engine
//!
//! [`Editor`] owns the one active [`EditorState`] and is the only way to
//! change it. Every operation is a transform applied to a copy of the state.
//! If the copy differs afterwards it replaces the active state and, when the
//! operation is history-significant, the previous state is pushed onto the
//! undo stack. Generated page-number content is re-derived inside the same
//! step whenever one of its inputs moved.
//!
//! Operations referring to something that does not exist, or that would
//! break a structural guard, leave the state untouched and report `false`.

use crate::document_model::{
    new_id, snap_to_grid, AssetImage, Component, ComponentProps, ComponentType, ComponentUpdate,
    DocumentSettings, EditorState, ImageProps, Page, Point, Section, TableProps, Template,
    TemplateProperties,
};
use crate::gesture::{Gesture, GestureKind};
use crate::history::{History, Recording, UndoManager};
use crate::reconciler::{self, GeneratedContentKey, PageGeometry};

/// Something dropped onto a page section
#[derive(Debug, Clone, PartialEq)]
pub enum DropPayload {
    /// A component type dragged from the library
    Component(ComponentType),
    /// An uploaded image dragged from the asset panel
    ImageAsset { src: String },
}

/// The active editing session's state, history and pointer gesture
#[derive(Debug)]
pub struct Editor {
    state: EditorState,
    history: History,
    geometry: PageGeometry,
    gesture: Option<Gesture>,
}

impl Editor {
    /// Activate a state for editing
    ///
    /// The state is repaired so the editing invariants hold and its
    /// generated content is rebuilt. History starts empty.
    pub fn new(mut state: EditorState, history_limit: usize, geometry: PageGeometry) -> Self {
        state.normalize();
        reconciler::reconcile(&mut state, &geometry);
        Self {
            state,
            history: History::new(history_limit),
            geometry,
            gesture: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Apply a transform to a copy of the state
    ///
    /// # Parameters
    /// * `recording` - Whether the previous state is pushed onto the undo stack
    /// * `transform` - Edits the draft in place
    ///
    /// # Returns
    /// * `true` - The state changed
    /// * `false` - The transform left everything as it was; nothing is recorded
    pub fn apply<F>(&mut self, recording: Recording, transform: F) -> bool
    where
        F: FnOnce(&mut EditorState),
    {
        let key = GeneratedContentKey::of(&self.state);
        let mut draft = self.state.clone();
        transform(&mut draft);
        reconciler::reconcile_if_changed(&key, &mut draft, &self.geometry);

        if draft == self.state {
            return false;
        }

        let previous = std::mem::replace(&mut self.state, draft);
        if recording == Recording::Record {
            self.history.record(previous);
        }
        true
    }

    /// Add a component to the current page
    ///
    /// The drop position is snapped when snapping is enabled. When initial
    /// properties are supplied the component is centered on the drop point.
    /// The new component becomes the selection.
    ///
    /// # Returns
    /// * `Some(id)` - Id of the new component
    /// * `None` - Initial properties of another type were supplied
    pub fn add_component(
        &mut self,
        kind: ComponentType,
        section: Section,
        position: Point,
        initial_props: Option<ComponentProps>,
    ) -> Option<String> {
        if let Some(props) = &initial_props {
            if props.component_type() != kind {
                log::warn!(
                    "Refusing to add {} with {} properties",
                    kind,
                    props.component_type()
                );
                return None;
            }
        }

        let id = new_id(kind.as_str());
        let component_id = id.clone();
        let changed = self.apply(Recording::Record, move |draft| {
            let (mut x, mut y) = (position.x, position.y);
            if draft.is_snap_to_grid_enabled {
                x = snap_to_grid(x, draft.grid_size);
                y = snap_to_grid(y, draft.grid_size);
            }
            let size = kind.default_size();
            let centered = initial_props.is_some();
            let props = initial_props.unwrap_or_else(|| ComponentProps::defaults_for(kind));
            if centered {
                x -= size.width / 2.0;
                y -= size.height / 2.0;
            }

            let Some(page) = draft.current_page_mut() else {
                return;
            };
            page.content
                .section_mut(section)
                .push(Component::new(component_id.clone(), Point::new(x, y), size, props));
            draft.selected_component_id = Some(component_id);
        });

        changed.then_some(id)
    }

    /// Add whatever was dropped onto a section
    pub fn drop_payload(
        &mut self,
        payload: DropPayload,
        section: Section,
        position: Point,
    ) -> Option<String> {
        match payload {
            DropPayload::Component(kind) => self.add_component(kind, section, position, None),
            DropPayload::ImageAsset { src } => self.add_component(
                ComponentType::Image,
                section,
                position,
                Some(ComponentProps::Image(ImageProps::with_src(src))),
            ),
        }
    }

    /// Live edit of a component's geometry or properties
    pub fn update_component(&mut self, id: &str, update: ComponentUpdate) -> bool {
        self.apply(Recording::Skip, |draft| {
            if let Some(component) = draft.find_component_mut(id) {
                if component.is_generated {
                    log::debug!("Ignoring update of generated '{}'", id);
                    return;
                }
                component.apply(update);
            }
        })
    }

    /// Live edit of a component's property set in place
    pub fn edit_props<F>(&mut self, id: &str, edit: F) -> bool
    where
        F: FnOnce(&mut ComponentProps),
    {
        self.apply(Recording::Skip, |draft| {
            if let Some(component) = draft.find_component_mut(id) {
                if !component.is_generated {
                    edit(&mut component.props);
                }
            }
        })
    }

    /// Live edit of a table component's structure or cells
    pub fn edit_table<F>(&mut self, id: &str, edit: F) -> bool
    where
        F: FnOnce(&mut TableProps),
    {
        self.edit_props(id, |props| {
            if let Some(table) = props.as_table_mut() {
                edit(table);
            }
        })
    }

    /// Point an image component at a new source
    ///
    /// A no-op if the component was deleted in the meantime.
    pub fn set_image_src(&mut self, id: &str, src: String) -> bool {
        self.edit_props(id, |props| {
            if let ComponentProps::Image(image) = props {
                image.src = src;
            }
        })
    }

    /// Select a component on the current page, or clear the selection
    ///
    /// Unknown and generated components cannot be selected.
    pub fn select_component(&mut self, id: Option<&str>) -> bool {
        let Some(id) = id else {
            return self.apply(Recording::Skip, |draft| draft.selected_component_id = None);
        };
        match self.state.find_component(id) {
            Some((_, component)) if !component.is_generated => {}
            _ => {
                log::debug!("Refusing to select '{}'", id);
                return false;
            }
        }
        self.apply(Recording::Skip, |draft| {
            draft.selected_component_id = Some(id.to_string())
        })
    }

    /// Remove a user component from the current page
    pub fn delete_component(&mut self, id: &str) -> bool {
        if let Some((_, component)) = self.state.find_component(id) {
            if component.is_generated {
                log::debug!("Refusing to delete generated '{}'", id);
                return false;
            }
        }
        self.apply(Recording::Record, |draft| {
            let Some(page) = draft.current_page_mut() else {
                return;
            };
            if page.content.remove(id).is_some()
                && draft.selected_component_id.as_deref() == Some(id)
            {
                draft.selected_component_id = None;
            }
        })
    }

    /// Delete the selected component, if any
    pub fn delete_selected(&mut self) -> bool {
        match self.state.selected_component_id.clone() {
            Some(id) => self.delete_component(&id),
            None => false,
        }
    }

    /// Append a blank page and make it current
    pub fn add_page(&mut self) -> bool {
        self.apply(Recording::Record, |draft| {
            let name = format!("Page {}", draft.pages.len() + 1);
            push_current_page(draft, Page::blank(new_id("page"), name));
        })
    }

    /// Append a copy of a session template's content and make it current
    pub fn add_page_from_template(&mut self, template_id: &str) -> bool {
        self.apply(Recording::Record, |draft| {
            let Some(template) = draft.template(template_id) else {
                return;
            };
            let page = Page::from_content(
                new_id("page"),
                format!("{} Copy", template.name),
                &template.page,
            );
            push_current_page(draft, page);
        })
    }

    pub fn rename_page(&mut self, index: usize, name: &str) -> bool {
        self.apply(Recording::Record, |draft| {
            if let Some(page) = draft.pages.get_mut(index) {
                page.name = name.to_string();
            }
        })
    }

    /// Delete a page
    ///
    /// The last remaining page is never deleted. The current index moves one
    /// page back, stopping at the first page.
    pub fn delete_page(&mut self, index: usize) -> bool {
        if self.state.pages.len() <= 1 {
            log::debug!("Refusing to delete the last page");
            return false;
        }
        self.apply(Recording::Record, |draft| {
            if index >= draft.pages.len() {
                return;
            }
            draft.pages.remove(index);
            draft.current_page_index = draft
                .current_page_index
                .saturating_sub(1)
                .min(draft.pages.len() - 1);
            draft.selected_component_id = None;
        })
    }

    pub fn switch_page(&mut self, index: usize) -> bool {
        self.apply(Recording::Skip, |draft| {
            if index < draft.pages.len() {
                draft.current_page_index = index;
                draft.selected_component_id = None;
            }
        })
    }

    /// Add an uploaded image to the session's assets
    pub fn add_user_image(&mut self, src: String) -> Option<String> {
        let id = new_id("image-asset");
        let asset = AssetImage {
            id: id.clone(),
            src,
        };
        self.apply(Recording::Record, |draft| draft.assets.images.push(asset))
            .then_some(id)
    }

    /// Change document-wide settings
    pub fn update_document_settings<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut DocumentSettings),
    {
        self.apply(Recording::Record, |draft| edit(&mut draft.document_settings))
    }

    /// Change the grid spacing; non-positive sizes are ignored
    pub fn set_grid_size(&mut self, size: f64) -> bool {
        if !(size > 0.0) {
            return false;
        }
        self.apply(Recording::Skip, |draft| draft.grid_size = size)
    }

    pub fn set_grid_visible(&mut self, visible: bool) -> bool {
        self.apply(Recording::Skip, |draft| draft.is_grid_visible = visible)
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) -> bool {
        self.apply(Recording::Skip, |draft| draft.is_snap_to_grid_enabled = enabled)
    }

    pub fn set_project_name(&mut self, name: &str, recording: Recording) -> bool {
        self.apply(recording, |draft| draft.project_name = name.to_string())
    }

    /// Make a template available to this session
    pub fn add_session_template(&mut self, template: Template, recording: Recording) -> bool {
        self.apply(recording, |draft| {
            if draft.template(&template.id).is_none() {
                draft.templates.push(template);
            }
        })
    }

    /// Update the metadata of the session's copy of a template
    pub fn update_session_template(&mut self, id: &str, properties: &TemplateProperties) -> bool {
        self.apply(Recording::Skip, |draft| {
            if let Some(template) = draft.templates.iter_mut().find(|t| t.id == id) {
                template.apply_properties(properties);
            }
        })
    }

    /// Swap the session's copy of a template for a newer version
    pub fn replace_session_template(&mut self, template: Template) -> bool {
        self.apply(Recording::Skip, |draft| {
            if let Some(slot) = draft.templates.iter_mut().find(|t| t.id == template.id) {
                *slot = template;
            }
        })
    }

    pub fn remove_session_template(&mut self, id: &str) -> bool {
        self.apply(Recording::Skip, |draft| draft.templates.retain(|t| t.id != id))
    }

    /// Start moving or resizing a component on the current page
    ///
    /// Only one gesture can be active. Unknown and generated components
    /// refuse gestures.
    pub fn begin_gesture(&mut self, kind: GestureKind, id: &str) -> bool {
        if self.gesture.is_some() {
            log::debug!("A gesture is already active");
            return false;
        }
        let Some((_, component)) = self.state.find_component(id) else {
            return false;
        };
        self.gesture = Gesture::begin(kind, component);
        self.gesture.is_some()
    }

    pub fn active_gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Follow the pointer; `delta` is measured from where the gesture began
    pub fn update_gesture(&mut self, delta: Point) -> bool {
        let Some(gesture) = self.gesture.clone() else {
            return false;
        };
        let update = gesture.live_update(delta, self.state.grid_size);
        self.update_component(gesture.component_id(), update)
    }

    /// Release the pointer, committing the snapped geometry
    pub fn end_gesture(&mut self, delta: Point) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        let update = gesture.release_update(
            delta,
            self.state.grid_size,
            self.state.is_snap_to_grid_enabled,
        );
        self.update_component(gesture.component_id(), update)
    }

    /// Abandon the gesture, restoring the starting geometry
    pub fn cancel_gesture(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        self.update_component(gesture.component_id(), gesture.cancel_update())
    }
}

impl UndoManager for Editor {
    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(&self.state) else {
            return false;
        };
        self.state = previous;
        self.gesture = None;
        true
    }

    fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo(&self.state) else {
            return false;
        };
        self.state = next;
        self.gesture = None;
        true
    }

    fn clear_history(&mut self) {
        self.history.clear();
    }
}

fn push_current_page(draft: &mut EditorState, page: Page) {
    draft.pages.push(page);
    draft.current_page_index = draft.pages.len() - 1;
    draft.selected_component_id = None;
}
