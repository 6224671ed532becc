//! Template propagation
//!
//! A template exists in up to three places at once: the canonical library,
//! the template list of the open editor, and the template list embedded in
//! every saved project. [`TemplateCoordinator`] applies each library change
//! to all of them.
//!
//! Every change is computed on copies first. A copy replaces the in-memory
//! collection only once it has been persisted, so a failed write leaves the
//! collection exactly as it was.

use crate::document_model::{PageContent, Project, Template, TemplateProperties};
use crate::mutation::Editor;
use crate::session::SessionError;
use crate::storage::{KeyValueStore, Storage};

/// Borrowed view of everything a template change has to reach
pub struct TemplateCoordinator<'a, S> {
    pub templates: &'a mut Vec<Template>,
    pub projects: &'a mut Vec<Project>,
    pub editor: Option<&'a mut Editor>,
    pub storage: &'a mut Storage<S>,
}

impl<S: KeyValueStore> TemplateCoordinator<'_, S> {
    /// Append a template to the library and persist it
    pub fn add(&mut self, template: Template) -> Result<(), SessionError> {
        let mut library = self.templates.clone();
        log::info!("Adding template '{}' ({})", template.name, template.id);
        library.push(template);
        self.storage.save_custom_templates(&library)?;
        *self.templates = library;
        Ok(())
    }

    /// Change a custom template's name, category and tags
    ///
    /// The open editor's copy follows without an undo step. Copies embedded
    /// in saved projects keep their old metadata.
    pub fn update_properties(
        &mut self,
        id: &str,
        properties: &TemplateProperties,
    ) -> Result<(), SessionError> {
        self.require_custom(id)?;

        let mut library = self.templates.clone();
        if let Some(template) = library.iter_mut().find(|t| t.id == id) {
            template.apply_properties(properties);
        }
        self.storage.save_custom_templates(&library)?;
        *self.templates = library;

        if let Some(editor) = self.editor.as_deref_mut() {
            editor.update_session_template(id, properties);
        }
        Ok(())
    }

    /// Replace a custom template's page content
    ///
    /// The new content also replaces the copy in the open editor and in every
    /// saved project that embeds the template.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of saved projects that were updated
    /// * `Err(SessionError)` - The template is unknown or built in, or persisting failed
    pub fn resave_content(&mut self, id: &str, content: PageContent) -> Result<usize, SessionError> {
        self.require_custom(id)?;

        let mut library = self.templates.clone();
        let mut updated = None;
        if let Some(template) = library.iter_mut().find(|t| t.id == id) {
            template.page = content.clone();
            updated = Some(template.clone());
        }
        self.storage.save_custom_templates(&library)?;
        *self.templates = library;

        if let (Some(editor), Some(template)) = (self.editor.as_deref_mut(), updated) {
            editor.replace_session_template(template);
        }

        let mut projects = self.projects.clone();
        let mut touched = 0;
        for project in &mut projects {
            let mut embeds = false;
            for template in project.state.templates.iter_mut().filter(|t| t.id == id) {
                template.page = content.clone();
                embeds = true;
            }
            if embeds {
                touched += 1;
            }
        }
        if touched > 0 {
            self.storage.save_projects(&projects)?;
            *self.projects = projects;
        }
        log::info!("Saved template {} into {} projects", id, touched);
        Ok(touched)
    }

    /// Delete a custom template everywhere
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of saved projects the template was removed from
    /// * `Err(SessionError)` - The template is unknown or built in, or persisting failed
    pub fn delete(&mut self, id: &str) -> Result<usize, SessionError> {
        self.require_custom(id)?;

        let library: Vec<Template> = self
            .templates
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();

        let mut projects = self.projects.clone();
        let mut touched = 0;
        for project in &mut projects {
            let before = project.state.templates.len();
            project.state.templates.retain(|t| t.id != id);
            if project.state.templates.len() != before {
                touched += 1;
            }
        }

        self.storage.save_custom_templates(&library)?;
        *self.templates = library;
        self.storage.save_projects(&projects)?;
        *self.projects = projects;

        if let Some(editor) = self.editor.as_deref_mut() {
            editor.remove_session_template(id);
        }
        log::info!("Deleted template {} from the library and {} projects", id, touched);
        Ok(touched)
    }

    fn require_custom(&self, id: &str) -> Result<(), SessionError> {
        match self.templates.iter().find(|t| t.id == id) {
            None => Err(SessionError::UnknownTemplate(id.to_string())),
            Some(template) if !template.is_custom() => {
                Err(SessionError::BuiltinTemplate(id.to_string()))
            }
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::{
        Component, ComponentProps, ComponentType, EditorState, Page, Point, CUSTOM_CATEGORY,
    };
    use crate::history::DEFAULT_HISTORY_LIMIT;
    use crate::reconciler::PageGeometry;
    use crate::storage::{MemoryStore, StorageError};

    fn template(id: &str, category: &str) -> Template {
        Template {
            id: id.to_string(),
            name: format!("Template {}", id),
            category: category.to_string(),
            tags: Default::default(),
            preview_image: None,
            page: PageContent::default(),
        }
    }

    fn project_embedding(templates: Vec<Template>) -> Project {
        let state = EditorState::with_pages("Manual", vec![Page::blank("p", "P")], templates);
        Project::new("proj-1", state)
    }

    struct Fixture {
        templates: Vec<Template>,
        projects: Vec<Project>,
        storage: Storage<MemoryStore>,
    }

    impl Fixture {
        fn new() -> Self {
            let templates = vec![template("builtin", "Layout"), template("template-1", CUSTOM_CATEGORY)];
            let projects = vec![project_embedding(templates.clone())];
            Self {
                templates,
                projects,
                storage: Storage::new(MemoryStore::new()),
            }
        }

        fn coordinator(&mut self) -> TemplateCoordinator<'_, MemoryStore> {
            TemplateCoordinator {
                templates: &mut self.templates,
                projects: &mut self.projects,
                editor: None,
                storage: &mut self.storage,
            }
        }
    }

    #[test]
    fn test_delete_cascades_into_projects() {
        let mut fixture = Fixture::new();
        let touched = fixture.coordinator().delete("template-1").unwrap();
        assert_eq!(touched, 1);
        assert_eq!(fixture.templates.len(), 1);
        assert_eq!(fixture.projects[0].state.templates.len(), 1);

        let stored = fixture.storage.load_projects();
        assert!(stored[0].state.templates.iter().all(|t| t.id != "template-1"));
        assert!(fixture.storage.load_templates(Vec::new()).is_empty());
    }

    #[test]
    fn test_builtins_are_read_only() {
        let mut fixture = Fixture::new();
        assert!(matches!(
            fixture.coordinator().delete("builtin"),
            Err(SessionError::BuiltinTemplate(_))
        ));
        assert!(matches!(
            fixture.coordinator().resave_content("builtin", PageContent::default()),
            Err(SessionError::BuiltinTemplate(_))
        ));
        assert!(matches!(
            fixture.coordinator().delete("nope"),
            Err(SessionError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_resave_propagates_content() {
        let mut fixture = Fixture::new();
        let mut content = PageContent::default();
        content.header.push(Component::new(
            "Text-1",
            Point::new(0.0, 0.0),
            ComponentType::Text.default_size(),
            ComponentProps::defaults_for(ComponentType::Text),
        ));

        let touched = fixture
            .coordinator()
            .resave_content("template-1", content.clone())
            .unwrap();
        assert_eq!(touched, 1);
        assert_eq!(fixture.templates[1].page, content);
        let embedded = &fixture.projects[0].state.templates[1];
        assert_eq!(embedded.page.header.len(), 1);
        assert_eq!(fixture.storage.load_projects()[0].state.templates[1].page, content);
    }

    #[test]
    fn test_property_update_leaves_projects_alone() {
        let mut fixture = Fixture::new();
        let properties = TemplateProperties::new("Renamed", "", ["a"]);
        fixture
            .coordinator()
            .update_properties("template-1", &properties)
            .unwrap();
        assert_eq!(fixture.templates[1].name, "Renamed");
        assert_eq!(fixture.templates[1].category, CUSTOM_CATEGORY);
        assert_eq!(fixture.projects[0].state.templates[1].name, "Template template-1");
    }

    #[test]
    fn test_editor_copy_follows_library() {
        let mut fixture = Fixture::new();
        let state = EditorState::with_pages(
            "Editing",
            vec![Page::blank("p", "P")],
            fixture.templates.clone(),
        );
        let mut editor = Editor::new(state, DEFAULT_HISTORY_LIMIT, PageGeometry::default());
        let mut coordinator = TemplateCoordinator {
            templates: &mut fixture.templates,
            projects: &mut fixture.projects,
            editor: Some(&mut editor),
            storage: &mut fixture.storage,
        };
        coordinator
            .update_properties("template-1", &TemplateProperties::custom("New name", Vec::<String>::new()))
            .unwrap();
        coordinator.delete("template-1").unwrap();
        assert_eq!(editor.state().templates.len(), 1);
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_failed_write_keeps_memory_unchanged() {
        let mut fixture = Fixture::new();
        fixture.storage.store_mut().set_read_only(true);
        let result = fixture.coordinator().delete("template-1");
        assert!(matches!(
            result,
            Err(SessionError::Storage(StorageError::ReadOnly { .. }))
        ));
        assert_eq!(fixture.templates.len(), 2);
        assert_eq!(fixture.projects[0].state.templates.len(), 2);
    }
}
