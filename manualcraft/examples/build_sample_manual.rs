//! Builds a two-page sample manual in memory and prints its stored JSON
//!
//! Run with: cargo run --example build_sample_manual

use manualcraft::document_model::{ComponentType, Point, Section};
use manualcraft::{CreationRequest, EditorConfig, MemoryStore, Session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(MemoryStore::new(), EditorConfig::default());

    let cover = session
        .template("builtin-cover-page")
        .ok_or("cover template missing")?
        .clone();
    session.start_creation()?;
    let id = session.finish_creation(CreationRequest::from_template("Sample Pump Manual", &cover))?;

    let editor = session.editor_mut()?;
    editor.update_document_settings(|settings| settings.show_page_numbers = true);
    editor.add_page_from_template("builtin-safety");
    editor.add_component(ComponentType::Divider, Section::Body, Point::new(40.0, 600.0), None);
    session.save_changes()?;

    let project = session.project(&id).ok_or("project was not saved")?;
    println!("{}", serde_json::to_string_pretty(project)?);
    Ok(())
}
