use manualcraft::document_model::{
    CellRef, ComponentProps, ComponentType, EditorState, Page, Point, Project, Section, TextProps,
};
use manualcraft::history::DEFAULT_HISTORY_LIMIT;
use manualcraft::reconciler::{page_number_id, PageGeometry};
use manualcraft::storage::{CUSTOM_TEMPLATES_KEY, PROJECTS_KEY};
use manualcraft::{
    CreationRequest, Editor, EditorConfig, FileStore, MemoryStore, SaveOutcome, Session, Theme,
    UndoManager,
};
use std::fs;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing fixture {}: {}", path.display(), e))
}

fn seeded_store() -> MemoryStore {
    MemoryStore::new()
        .with_value(PROJECTS_KEY, fixture("manualProjects.json"))
        .with_value(CUSTOM_TEMPLATES_KEY, fixture("customTemplates.json"))
}

fn single_page_editor() -> Editor {
    let state = EditorState::with_pages("Manual", vec![Page::blank("page-1", "Page 1")], Vec::new());
    Editor::new(state, DEFAULT_HISTORY_LIMIT, PageGeometry::default())
}

#[test]
fn test_fixture_roundtrips_through_json() {
    let projects: Vec<Project> = serde_json::from_str(&fixture("manualProjects.json")).unwrap();
    assert_eq!(projects.len(), 1);
    assert!(projects[0].state.validate().is_ok());

    let json = serde_json::to_string(&projects).unwrap();
    let reparsed: Vec<Project> = serde_json::from_str(&json).unwrap();
    assert_eq!(reparsed, projects);
}

#[test]
fn test_stored_customs_join_builtins() {
    let session = Session::open(seeded_store(), EditorConfig::default());
    assert_eq!(session.templates().len(), 5);
    assert!(session.template("template-1").unwrap().is_custom());
    assert_eq!(session.projects()[0].name, "Pump Manual");
}

#[test]
fn test_template_delete_cascades_into_saved_projects() {
    let mut session = Session::open(seeded_store(), EditorConfig::default());
    let mut yes = |_: &str| true;
    assert!(session.delete_template("template-1", &mut yes).unwrap());

    assert!(session.template("template-1").is_none());
    let stored = session.storage().load_projects();
    assert!(stored[0].state.templates.is_empty());
    assert_eq!(session.storage().load_templates(Vec::new()).len(), 0);
}

#[test]
fn test_template_edit_updates_library_and_projects() {
    let mut session = Session::open(seeded_store(), EditorConfig::default());
    assert!(session.template("template-1").unwrap().page.header.is_empty());

    session.edit_template("template-1").unwrap();
    let header_text = TextProps {
        text: "Maintenance Schedule".to_string(),
        ..TextProps::default()
    };
    session
        .editor_mut()
        .unwrap()
        .add_component(
            ComponentType::Text,
            Section::Header,
            Point::new(200.0, 40.0),
            Some(ComponentProps::Text(header_text)),
        )
        .unwrap();

    assert_eq!(
        session.save_changes().unwrap(),
        SaveOutcome::TemplateSaved { projects_updated: 1 }
    );

    let template = session.template("template-1").unwrap();
    assert_eq!(template.page.header.len(), 1);
    let saved_text = template.page.header[0].props.as_text().unwrap();
    assert_eq!(saved_text.text, "Maintenance Schedule");
    assert_eq!(template.page.body.len(), 1);

    let stored = session.storage().load_projects();
    let embedded = &stored[0].state.templates[0];
    assert_eq!(embedded.page.header.len(), 1);
    assert_eq!(
        embedded.page.header[0].props.as_text().unwrap().text,
        "Maintenance Schedule"
    );
}

#[test]
fn test_loaded_project_gets_page_numbers_but_storage_does_not_change() {
    let mut session = Session::open(seeded_store(), EditorConfig::default());
    session.load_project("proj-1").unwrap();

    let editor = session.editor().unwrap();
    let footer = &editor.state().pages[0].content.footer;
    assert_eq!(footer.len(), 1);
    assert_eq!(footer[0].id, page_number_id("page-1"));
    assert!(!editor.can_undo());

    assert!(session.storage().load_projects()[0].state.pages[0]
        .content
        .footer
        .is_empty());
}

#[test]
fn test_undo_redo_symmetry() {
    let mut editor = single_page_editor();
    let mut states = vec![editor.state().clone()];
    for i in 0..5 {
        editor
            .add_component(
                ComponentType::Divider,
                Section::Body,
                Point::new(0.0, i as f64 * 40.0),
                None,
            )
            .unwrap();
        states.push(editor.state().clone());
    }

    for expected in states.iter().rev().skip(1) {
        assert!(editor.undo());
        assert_eq!(editor.state(), expected);
    }
    assert!(!editor.undo());

    for expected in states.iter().skip(1) {
        assert!(editor.redo());
        assert_eq!(editor.state(), expected);
    }
    assert!(!editor.redo());
}

#[test]
fn test_history_keeps_fifty_steps() {
    let mut editor = single_page_editor();
    for _ in 0..60 {
        assert!(editor.add_page());
    }
    let mut undone = 0;
    while editor.undo() {
        undone += 1;
    }
    assert_eq!(undone, 50);
    assert_eq!(editor.state().pages.len(), 11);
}

#[test]
fn test_only_page_cannot_be_deleted() {
    let mut editor = single_page_editor();
    assert!(!editor.delete_page(0));
    assert_eq!(editor.state().pages.len(), 1);
    assert!(!editor.can_undo());
}

#[test]
fn test_generated_page_numbers_are_protected() {
    let mut editor = single_page_editor();
    editor.update_document_settings(|settings| settings.show_page_numbers = true);
    let stamp = page_number_id("page-1");
    assert!(editor.state().find_component(&stamp).is_some());

    assert!(!editor.delete_component(&stamp));
    assert!(!editor.select_component(Some(&stamp)));
    assert!(editor.state().find_component(&stamp).is_some());
    assert!(editor.state().selected_component_id.is_none());
}

#[test]
fn test_file_store_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = EditorConfig {
        storage_dir: dir.path().to_path_buf(),
        ..EditorConfig::default()
    };

    let mut session = Session::open(FileStore::new(dir.path()), config.clone());
    session.start_creation().unwrap();
    let id = session.finish_creation(CreationRequest::blank("Compressor")).unwrap();
    session.editor_mut().unwrap().add_page();
    session.save_changes().unwrap();
    session.toggle_theme().unwrap();
    let saved = session.project(&id).unwrap().clone();

    let reopened = Session::open(FileStore::new(dir.path()), config);
    assert_eq!(reopened.project(&id), Some(&saved));
    assert_eq!(reopened.theme(), Theme::Light);
    assert!(dir.path().join("manualProjects.json").exists());
}

#[test]
fn test_corrupt_store_starts_empty() {
    let store = MemoryStore::new()
        .with_value(PROJECTS_KEY, "{not json")
        .with_value("theme", "purple");
    let session = Session::open(store, EditorConfig::default());
    assert!(session.projects().is_empty());
    assert_eq!(session.templates().len(), 4);
    assert_eq!(session.theme(), Theme::Dark);
}

#[test]
fn test_legacy_projects_load_and_survive_a_new_save() {
    let store = MemoryStore::new().with_value(PROJECTS_KEY, fixture("legacyProjects.json"));
    let mut session = Session::open(store, EditorConfig::default());
    assert_eq!(session.projects().len(), 1);

    let body = &session.project("proj-1").unwrap().state.pages[0].content.body;
    let first = body[0].props.as_table().unwrap();
    assert_eq!(first.selected_cell, Some(CellRef::Header { col: 1 }));
    assert_eq!(first.cell_font_size, 0.0);
    assert_eq!(first.headers[1].rowspan, 1);
    assert_eq!(first.rows[0][1].colspan, 1);
    let second = body[1].props.as_table().unwrap();
    assert_eq!(second.selected_cell, Some(CellRef::Body { row: 0, col: 0 }));

    session.start_creation().unwrap();
    let id = session.finish_creation(CreationRequest::blank("Other")).unwrap();

    let stored = session.storage().load_projects();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().any(|p| p.id == "proj-1"));
    assert!(stored.iter().any(|p| p.id == id));
}
