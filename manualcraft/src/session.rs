//! Editor session controller
//!
//! [`Session`] decides which document the editor is bound to. It moves
//! between the home screen, the creation wizard, the template manager and
//! editing, and owns the in-memory copies of the persisted collections.

mod error;

pub use error::SessionError;

use crate::config::EditorConfig;
use crate::document_model::{
    new_id, Component, ComponentProps, EditorState, Page, Point, Project, Size,
    Template, TemplateProperties, TextProps, TextType,
};
use crate::history::Recording;
use crate::mutation::Editor;
use crate::propagation::TemplateCoordinator;
use crate::storage::{KeyValueStore, Storage, Theme};
use crate::templates::builtin_library;

/// Which document an editing session writes back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditingTarget {
    /// A saved project
    Project(String),
    /// The content of an existing template
    Template(String),
    /// A template that has not been saved yet
    NewTemplate,
}

/// Screen the controller is on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Creating,
    Editing(EditingTarget),
    ManagingTemplates,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Home => write!(f, "on the home screen"),
            View::Creating => write!(f, "creating a manual"),
            View::Editing(EditingTarget::Project(id)) => write!(f, "editing project {}", id),
            View::Editing(EditingTarget::Template(id)) => write!(f, "editing template {}", id),
            View::Editing(EditingTarget::NewTemplate) => write!(f, "editing a new template"),
            View::ManagingTemplates => write!(f, "managing templates"),
        }
    }
}

/// Name and first pages of a manual about to be created
#[derive(Debug, Clone, PartialEq)]
pub struct CreationRequest {
    pub name: String,
    pub pages: Vec<Page>,
    /// Template the manual was started from; listed first in the manual's templates
    pub template_id: Option<String>,
}

impl CreationRequest {
    /// A manual with one page holding a title
    pub fn blank(name: &str) -> Self {
        let mut title = TextProps {
            text: "New Manual Title".to_string(),
            color: "#111827".to_string(),
            ..TextProps::default()
        };
        title.set_text_type(TextType::H1);

        let mut page = Page::blank(new_id("page"), "Page 1");
        page.content.body.push(Component::new(
            new_id("Text"),
            Point::new(40.0, 40.0),
            Size::new(736.0, 60.0),
            ComponentProps::Text(title),
        ));

        Self {
            name: name.to_string(),
            pages: vec![page],
            template_id: None,
        }
    }

    /// A manual with one page copied from a template
    pub fn from_template(name: &str, template: &Template) -> Self {
        Self {
            name: name.to_string(),
            pages: vec![Page::from_content(new_id("page"), "Page 1", &template.page)],
            template_id: Some(template.id.clone()),
        }
    }
}

/// What "save changes" did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    ProjectSaved,
    /// The template content was saved into the library and this many projects
    TemplateSaved { projects_updated: usize },
    /// A new template needs a name before it can be saved
    TemplateDetailsRequired,
}

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// The editor application state outside any single document
#[derive(Debug)]
pub struct Session<S> {
    config: EditorConfig,
    storage: Storage<S>,
    projects: Vec<Project>,
    templates: Vec<Template>,
    theme: Theme,
    view: View,
    editor: Option<Editor>,
}

impl<S: KeyValueStore> Session<S> {
    /// Start on the home screen with everything loaded from `store`
    pub fn open(store: S, config: EditorConfig) -> Self {
        let storage = Storage::new(store);
        let projects = storage.load_projects();
        let templates = storage.load_templates(builtin_library());
        let theme = storage.load_theme(config.preferred_theme);
        log::info!(
            "Loaded {} projects and {} templates",
            projects.len(),
            templates.len()
        );
        Self {
            config,
            storage,
            projects,
            templates,
            theme,
            view: View::Home,
            editor: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// The canonical template library
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Result<&mut Editor, SessionError> {
        self.editor.as_mut().ok_or(SessionError::NoActiveEditor)
    }

    /// Home screen to the creation wizard
    pub fn start_creation(&mut self) -> Result<(), SessionError> {
        self.expect_view(&[View::Home], "start a new manual")?;
        self.view = View::Creating;
        Ok(())
    }

    /// Creation wizard back to the home screen
    pub fn cancel_creation(&mut self) -> Result<(), SessionError> {
        self.expect_view(&[View::Creating], "cancel creation")?;
        self.view = View::Home;
        Ok(())
    }

    /// Home screen to the template manager
    pub fn manage_templates(&mut self) -> Result<(), SessionError> {
        self.expect_view(&[View::Home], "manage templates")?;
        self.view = View::ManagingTemplates;
        Ok(())
    }

    /// Create a project from the wizard and open it
    ///
    /// # Returns
    /// * `Ok(String)` - Id of the new project
    /// * `Err(SessionError)` - Not in the wizard, or the project could not be saved
    pub fn finish_creation(&mut self, request: CreationRequest) -> Result<String, SessionError> {
        self.expect_view(&[View::Creating], "create a manual")?;

        let templates = match request
            .template_id
            .as_deref()
            .and_then(|id| self.template(id))
        {
            Some(first) => std::iter::once(first.clone())
                .chain(self.templates.iter().filter(|t| t.id != first.id).cloned())
                .collect(),
            None => self.templates.clone(),
        };
        let state = EditorState::with_pages(request.name, request.pages, templates);
        let project = Project::new(new_id("proj"), state);
        let id = project.id.clone();

        let mut projects = self.projects.clone();
        projects.push(project.clone());
        self.storage.save_projects(&projects)?;
        self.projects = projects;

        log::info!("Created project '{}' ({})", project.name, id);
        self.activate(EditingTarget::Project(id.clone()), project.state);
        Ok(id)
    }

    /// Open a saved project exactly as it was stored
    pub fn load_project(&mut self, id: &str) -> Result<(), SessionError> {
        self.expect_view(&[View::Home], "open a project")?;
        let project = self
            .project(id)
            .ok_or_else(|| SessionError::UnknownProject(id.to_string()))?;
        let state = project.state.clone();
        self.activate(EditingTarget::Project(id.to_string()), state);
        Ok(())
    }

    /// Open the content of a template for editing
    pub fn edit_template(&mut self, id: &str) -> Result<(), SessionError> {
        self.expect_view(&[View::Home, View::ManagingTemplates], "edit a template")?;
        let template = self
            .template(id)
            .ok_or_else(|| SessionError::UnknownTemplate(id.to_string()))?;
        let page = Page::from_content(new_id("page-tpl"), "Template Page", &template.page);
        let state = EditorState::with_pages(
            format!("Editing: {}", template.name),
            vec![page],
            self.templates.clone(),
        );
        self.activate(EditingTarget::Template(id.to_string()), state);
        Ok(())
    }

    /// Start a template from a blank page
    pub fn create_new_template(&mut self) -> Result<(), SessionError> {
        self.expect_view(&[View::ManagingTemplates], "create a template")?;
        let page = Page::blank(new_id("page-new-tpl"), "Page 1");
        let state = EditorState::with_pages("New Template", vec![page], self.templates.clone());
        self.activate(EditingTarget::NewTemplate, state);
        Ok(())
    }

    /// Close whatever is open, discarding unsaved edits and history
    pub fn go_home(&mut self) {
        if self.editor.take().is_some() {
            log::debug!("Closed editor ({})", self.view);
        }
        self.view = View::Home;
    }

    /// Write the open document back to where it came from
    pub fn save_changes(&mut self) -> Result<SaveOutcome, SessionError> {
        let View::Editing(target) = self.view.clone() else {
            return Err(self.invalid("save changes"));
        };
        let editor = self.editor.as_ref().ok_or(SessionError::NoActiveEditor)?;

        match target {
            EditingTarget::Project(id) => {
                let state = editor.state().clone();
                let mut projects = self.projects.clone();
                let project = projects
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| SessionError::UnknownProject(id.clone()))?;
                project.store(state);
                self.storage.save_projects(&projects)?;
                self.projects = projects;
                log::info!("Saved project {}", id);
                Ok(SaveOutcome::ProjectSaved)
            }
            EditingTarget::Template(id) => {
                let content = editor
                    .state()
                    .current_page()
                    .map(|page| page.content.user_content())
                    .unwrap_or_default();
                let projects_updated = self.coordinator().resave_content(&id, content)?;
                Ok(SaveOutcome::TemplateSaved { projects_updated })
            }
            EditingTarget::NewTemplate => Ok(SaveOutcome::TemplateDetailsRequired),
        }
    }

    /// Save the current page as a new custom template
    ///
    /// In a project the template also joins the project's own list as an
    /// undoable step. A new template session becomes the editing session of
    /// the saved template.
    ///
    /// # Returns
    /// * `Ok(String)` - Id of the new template
    /// * `Err(SessionError)` - Nothing is open, or the library could not be saved
    pub fn save_as_template(&mut self, properties: TemplateProperties) -> Result<String, SessionError> {
        let View::Editing(target) = self.view.clone() else {
            return Err(self.invalid("save a template"));
        };
        let editor = self.editor.as_ref().ok_or(SessionError::NoActiveEditor)?;
        let page = editor
            .state()
            .current_page()
            .map(|page| page.content.user_content())
            .unwrap_or_default();

        let template = Template {
            id: new_id("template"),
            name: properties.name.clone(),
            category: properties.category.clone(),
            tags: properties.tags.clone(),
            preview_image: None,
            page,
        };
        let id = template.id.clone();
        self.coordinator().add(template.clone())?;

        match target {
            EditingTarget::Project(_) => {
                self.editor_mut()?
                    .add_session_template(template, Recording::Record);
            }
            EditingTarget::NewTemplate => {
                let editor = self.editor_mut()?;
                editor.set_project_name(&format!("Editing: {}", properties.name), Recording::Skip);
                editor.add_session_template(template, Recording::Skip);
                self.view = View::Editing(EditingTarget::Template(id.clone()));
            }
            EditingTarget::Template(_) => {}
        }
        Ok(id)
    }

    /// Change a custom template's name, category and tags
    pub fn update_template_properties(
        &mut self,
        id: &str,
        properties: &TemplateProperties,
    ) -> Result<(), SessionError> {
        self.coordinator().update_properties(id, properties)
    }

    /// Delete a custom template from the library and every project
    ///
    /// # Returns
    /// * `Ok(true)` - The template was deleted
    /// * `Ok(false)` - The user declined
    pub fn delete_template(&mut self, id: &str, confirm: &mut dyn Confirm) -> Result<bool, SessionError> {
        let template = self
            .template(id)
            .ok_or_else(|| SessionError::UnknownTemplate(id.to_string()))?;
        if !template.is_custom() {
            return Err(SessionError::BuiltinTemplate(id.to_string()));
        }
        let message = format!(
            "Delete template '{}'? This cannot be undone.",
            template.name
        );
        if !confirm.confirm(&message) {
            return Ok(false);
        }
        self.coordinator().delete(id)?;
        Ok(true)
    }

    /// Rename a saved project
    pub fn rename_project(&mut self, id: &str, name: &str) -> Result<(), SessionError> {
        let mut projects = self.projects.clone();
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| SessionError::UnknownProject(id.to_string()))?;
        project.rename(name);
        self.storage.save_projects(&projects)?;
        self.projects = projects;
        Ok(())
    }

    /// Delete a saved project that is not open
    ///
    /// # Returns
    /// * `Ok(true)` - The project was deleted
    /// * `Ok(false)` - The user declined
    pub fn delete_project(&mut self, id: &str, confirm: &mut dyn Confirm) -> Result<bool, SessionError> {
        if self.view == View::Editing(EditingTarget::Project(id.to_string())) {
            return Err(SessionError::ProjectOpen(id.to_string()));
        }
        let project = self
            .project(id)
            .ok_or_else(|| SessionError::UnknownProject(id.to_string()))?;
        let message = format!("Delete manual '{}'? This cannot be undone.", project.name);
        if !confirm.confirm(&message) {
            return Ok(false);
        }

        let projects: Vec<Project> = self.projects.iter().filter(|p| p.id != id).cloned().collect();
        self.storage.save_projects(&projects)?;
        self.projects = projects;
        log::info!("Deleted project {}", id);
        Ok(true)
    }

    /// Switch between light and dark and remember the choice
    pub fn toggle_theme(&mut self) -> Result<Theme, SessionError> {
        let theme = self.theme.toggled();
        self.storage.save_theme(theme)?;
        self.theme = theme;
        Ok(theme)
    }

    fn activate(&mut self, target: EditingTarget, state: EditorState) {
        let editor = Editor::new(state, self.config.history_limit, self.config.page_geometry());
        self.editor = Some(editor);
        self.view = View::Editing(target);
    }

    fn coordinator(&mut self) -> TemplateCoordinator<'_, S> {
        TemplateCoordinator {
            templates: &mut self.templates,
            projects: &mut self.projects,
            editor: self.editor.as_mut(),
            storage: &mut self.storage,
        }
    }

    fn expect_view(&self, allowed: &[View], action: &'static str) -> Result<(), SessionError> {
        if allowed.contains(&self.view) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            view: self.view.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::{ComponentType, Section, CUSTOM_CATEGORY};
    use crate::history::UndoManager;
    use crate::storage::MemoryStore;

    fn session() -> Session<MemoryStore> {
        Session::open(MemoryStore::new(), EditorConfig::default())
    }

    fn yes() -> impl FnMut(&str) -> bool {
        |_: &str| true
    }

    #[test]
    fn test_open_loads_builtins_and_theme() {
        let session = session();
        assert_eq!(session.view(), &View::Home);
        assert_eq!(session.templates().len(), 4);
        assert_eq!(session.theme(), Theme::Dark);
        assert!(session.editor().is_none());
    }

    #[test]
    fn test_blank_creation() {
        let mut session = session();
        session.start_creation().unwrap();
        let id = session.finish_creation(CreationRequest::blank("Pump")).unwrap();

        assert_eq!(session.view(), &View::Editing(EditingTarget::Project(id.clone())));
        let state = session.editor().unwrap().state();
        assert_eq!(state.project_name, "Pump");
        let title = &state.pages[0].content.body[0];
        let text = title.props.as_text().unwrap();
        assert_eq!(text.text, "New Manual Title");
        assert_eq!(text.font_size, 32.0);
        assert_eq!(title.size(), Size::new(736.0, 60.0));
        assert_eq!(session.storage().load_projects().len(), 1);
    }

    #[test]
    fn test_creation_from_template_lists_it_first() {
        let mut session = session();
        let chosen = session.templates()[2].clone();
        session.start_creation().unwrap();
        session
            .finish_creation(CreationRequest::from_template("Mixer", &chosen))
            .unwrap();
        let state = session.editor().unwrap().state();
        assert_eq!(state.templates[0].id, chosen.id);
        assert_eq!(state.templates.len(), 4);
        assert_eq!(state.pages[0].content, chosen.page);
    }

    #[test]
    fn test_transitions_are_checked() {
        let mut session = session();
        assert!(session.cancel_creation().is_err());
        assert!(session.create_new_template().is_err());
        assert!(matches!(
            session.save_changes(),
            Err(SessionError::InvalidTransition { .. })
        ));
        session.start_creation().unwrap();
        session.cancel_creation().unwrap();
        assert_eq!(session.view(), &View::Home);
    }

    #[test]
    fn test_save_changes_persists_project() {
        let mut session = session();
        session.start_creation().unwrap();
        let id = session.finish_creation(CreationRequest::blank("Pump")).unwrap();
        session.editor_mut().unwrap().add_page();
        assert_eq!(session.save_changes().unwrap(), SaveOutcome::ProjectSaved);

        session.go_home();
        assert!(session.editor().is_none());
        session.load_project(&id).unwrap();
        assert_eq!(session.editor().unwrap().state().pages.len(), 2);
        assert!(!session.editor().unwrap().can_undo());
    }

    #[test]
    fn test_new_template_flow() {
        let mut session = session();
        session.manage_templates().unwrap();
        session.create_new_template().unwrap();
        assert_eq!(session.save_changes().unwrap(), SaveOutcome::TemplateDetailsRequired);

        session
            .editor_mut()
            .unwrap()
            .add_component(ComponentType::Quote, Section::Body, Point::new(0.0, 0.0), None);
        let id = session
            .save_as_template(TemplateProperties::custom("Warning Box", ["safety"]))
            .unwrap();

        assert_eq!(session.view(), &View::Editing(EditingTarget::Template(id.clone())));
        let editor = session.editor().unwrap();
        assert_eq!(editor.state().project_name, "Editing: Warning Box");
        assert!(editor.state().template(&id).is_some());
        let saved = session.template(&id).unwrap();
        assert_eq!(saved.category, CUSTOM_CATEGORY);
        assert_eq!(saved.page.body.len(), 1);
        assert_eq!(session.storage().load_templates(Vec::new()).len(), 1);
    }

    #[test]
    fn test_save_as_template_in_project_is_undoable() {
        let mut session = session();
        session.start_creation().unwrap();
        session.finish_creation(CreationRequest::blank("Pump")).unwrap();
        let id = session
            .save_as_template(TemplateProperties::custom("Title", Vec::<String>::new()))
            .unwrap();
        let editor = session.editor_mut().unwrap();
        assert!(editor.state().template(&id).is_some());
        assert!(editor.undo());
        assert!(editor.state().template(&id).is_none());
        assert!(session.template(&id).is_some());
    }

    #[test]
    fn test_builtin_template_content_is_read_only() {
        let mut session = session();
        let builtin = session.templates()[0].id.clone();
        session.edit_template(&builtin).unwrap();
        assert!(matches!(
            session.save_changes(),
            Err(SessionError::BuiltinTemplate(_))
        ));
        assert!(matches!(
            session.delete_template(&builtin, &mut yes()),
            Err(SessionError::BuiltinTemplate(_))
        ));
    }

    #[test]
    fn test_declined_deletes_change_nothing() {
        let mut session = session();
        session.start_creation().unwrap();
        let id = session.finish_creation(CreationRequest::blank("Pump")).unwrap();
        let template = session
            .save_as_template(TemplateProperties::custom("Mine", Vec::<String>::new()))
            .unwrap();
        session.go_home();

        let mut no = |_: &str| false;
        assert!(!session.delete_project(&id, &mut no).unwrap());
        assert!(!session.delete_template(&template, &mut no).unwrap());
        assert_eq!(session.projects().len(), 1);
        assert!(session.template(&template).is_some());

        assert!(session.delete_project(&id, &mut yes()).unwrap());
        assert!(session.projects().is_empty());
        assert!(session.storage().load_projects().is_empty());
    }

    #[test]
    fn test_open_project_cannot_be_deleted() {
        let mut session = session();
        session.start_creation().unwrap();
        let id = session.finish_creation(CreationRequest::blank("Pump")).unwrap();
        assert!(matches!(
            session.delete_project(&id, &mut yes()),
            Err(SessionError::ProjectOpen(_))
        ));
    }

    #[test]
    fn test_rename_project() {
        let mut session = session();
        session.start_creation().unwrap();
        let id = session.finish_creation(CreationRequest::blank("Pump")).unwrap();
        session.rename_project(&id, "Pump v2").unwrap();
        let stored = &session.storage().load_projects()[0];
        assert_eq!(stored.name, "Pump v2");
        assert_eq!(stored.state.project_name, "Pump v2");
        assert!(matches!(
            session.rename_project("missing", "x"),
            Err(SessionError::UnknownProject(_))
        ));
    }

    #[test]
    fn test_failed_save_can_be_retried() {
        let mut session = session();
        session.start_creation().unwrap();
        let id = session.finish_creation(CreationRequest::blank("Pump")).unwrap();
        session.editor_mut().unwrap().add_page();

        session.storage.store_mut().set_read_only(true);
        assert!(matches!(session.save_changes(), Err(SessionError::Storage(_))));
        assert_eq!(session.project(&id).unwrap().state.pages.len(), 1);

        session.storage.store_mut().set_read_only(false);
        session.save_changes().unwrap();
        assert_eq!(session.project(&id).unwrap().state.pages.len(), 2);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let mut session = session();
        assert_eq!(session.toggle_theme().unwrap(), Theme::Light);
        let store = session.storage().store().clone();
        let reopened = Session::open(store, EditorConfig::default());
        assert_eq!(reopened.theme(), Theme::Light);
    }
}
