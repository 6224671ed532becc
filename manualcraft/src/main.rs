//! manualcraft - page-layout editor for technical manuals
//!
//! The command-line front end manages the manuals and templates kept in a
//! manualcraft store directory.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AssetAction, Cli, Commands, ExportFormat, PageAction, ProjectAction, TemplateAction, ThemeAction};
use itertools::Itertools;
use manualcraft::config::CONFIG_FILE_NAME;
use manualcraft::document_model::{
    ComponentProps, ComponentType, Point, Section, TableProps, TemplateProperties,
};
use manualcraft::{CreationRequest, Editor, EditorConfig, FileStore, Session};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Main entry point for the manualcraft CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Info);
    }
    logger.init();

    let mut session = open_session(cli.config.as_deref(), cli.store.as_deref())?;
    let assume_yes = cli.yes;
    let mut confirm = |message: &str| assume_yes || prompt(message);

    match cli.command {
        Commands::Projects { action } => match action {
            ProjectAction::List => handle_list_projects(&session),
            ProjectAction::Show { id } => handle_show_project(&session, &id)?,
            ProjectAction::Create { name, template } => {
                handle_create_project(&mut session, &name, template.as_deref())?;
            }
            ProjectAction::Rename { id, name } => {
                session
                    .rename_project(&id, &name)
                    .with_context(|| format!("Failed to rename project '{}'", id))?;
                println!("✓ Renamed {} to '{}'", id, name);
            }
            ProjectAction::Delete { id } => {
                if session
                    .delete_project(&id, &mut confirm)
                    .with_context(|| format!("Failed to delete project '{}'", id))?
                {
                    println!("✓ Deleted project {}", id);
                } else {
                    println!("Cancelled");
                }
            }
        },

        Commands::Page { action } => match action {
            PageAction::Add { project, template } => {
                edit_project(&mut session, &project, |editor| {
                    let added = match template.as_deref() {
                        Some(id) => editor.add_page_from_template(id),
                        None => editor.add_page(),
                    };
                    if !added {
                        anyhow::bail!(
                            "Template '{}' is not available in this manual",
                            template.as_deref().unwrap_or_default()
                        );
                    }
                    println!("✓ Manual now has {} pages", editor.state().pages.len());
                    Ok(())
                })?;
            }
            PageAction::ImportTable {
                project,
                path,
                page,
            } => handle_import_table(&mut session, &project, &path, page)?,
        },

        Commands::Templates { action } => match action {
            TemplateAction::List => handle_list_templates(&session),
            TemplateAction::Delete { id } => {
                if session
                    .delete_template(&id, &mut confirm)
                    .with_context(|| format!("Failed to delete template '{}'", id))?
                {
                    println!("✓ Deleted template {}", id);
                } else {
                    println!("Cancelled");
                }
            }
            TemplateAction::Rename {
                id,
                name,
                category,
                tags,
            } => {
                let current = session
                    .template(&id)
                    .with_context(|| format!("Template '{}' not found", id))?;
                let category = category.unwrap_or_else(|| current.category.clone());
                let tags = tags.unwrap_or_else(|| current.tags.iter().cloned().collect());
                let properties = TemplateProperties::new(&name, &category, tags);
                session
                    .update_template_properties(&id, &properties)
                    .with_context(|| format!("Failed to update template '{}'", id))?;
                println!("✓ Updated template {}", id);
            }
        },

        Commands::Asset { action } => match action {
            AssetAction::AddImage { project, path } => {
                handle_add_image(&mut session, &project, &path)?;
            }
        },

        Commands::Theme { action } => match action {
            ThemeAction::Get => println!("{}", session.theme()),
            ThemeAction::Toggle => {
                let theme = session.toggle_theme().context("Failed to save theme")?;
                println!("✓ Theme is now {}", theme);
            }
        },

        Commands::Export {
            project,
            output,
            format,
        } => {
            let project = session
                .project(&project)
                .with_context(|| format!("Project '{}' not found", project))?;
            let format = match format {
                ExportFormat::Pdf => "PDF",
                ExportFormat::Html => "HTML",
            };
            println!(
                "Export of '{}' to {} ({}) is not implemented yet",
                project.name,
                output.display(),
                format
            );
        }
    }

    Ok(())
}

/// Load configuration and open the store it names
fn open_session(config: Option<&Path>, store: Option<&Path>) -> Result<Session<FileStore>> {
    let config_path = config.map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), Path::to_path_buf);
    let mut config = EditorConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;
    if let Some(store) = store {
        config.storage_dir = store.to_path_buf();
    }
    log::info!("Using store {}", config.storage_dir.display());
    let store = FileStore::new(config.storage_dir.clone());
    Ok(Session::open(store, config))
}

/// Open a project, apply an edit and save it back
fn edit_project<F>(session: &mut Session<FileStore>, id: &str, edit: F) -> Result<()>
where
    F: FnOnce(&mut Editor) -> Result<()>,
{
    session
        .load_project(id)
        .with_context(|| format!("Failed to open project '{}'", id))?;
    edit(session.editor_mut()?)?;
    session
        .save_changes()
        .with_context(|| format!("Failed to save project '{}'", id))?;
    session.go_home();
    Ok(())
}

/// Handle the projects list command
fn handle_list_projects(session: &Session<FileStore>) {
    if session.projects().is_empty() {
        println!("No saved manuals");
        return;
    }
    for project in session.projects() {
        println!(
            "  {} - {} ({} pages)",
            project.id,
            project.name,
            project.state.pages.len()
        );
    }
}

/// Handle the projects show command
fn handle_show_project(session: &Session<FileStore>, id: &str) -> Result<()> {
    let project = session
        .project(id)
        .with_context(|| format!("Project '{}' not found", id))?;
    println!("{} ({})", project.name, project.id);
    for (i, page) in project.state.pages.iter().enumerate() {
        let counts = Section::ALL
            .iter()
            .map(|section| format!("{} {}", page.content.section(*section).len(), section))
            .join(", ");
        println!("  {}. {} - {}", i + 1, page.name, counts);
    }
    println!("Templates: {}", project.state.templates.len());
    println!("Images: {}", project.state.assets.images.len());
    if let Err(e) = project.state.validate() {
        println!("Warning: {}", e);
    }
    Ok(())
}

/// Handle the projects create command
fn handle_create_project(
    session: &mut Session<FileStore>,
    name: &str,
    template: Option<&str>,
) -> Result<()> {
    let request = match template {
        Some(id) => {
            let template = session
                .template(id)
                .with_context(|| format!("Template '{}' not found. Run 'manualcraft templates list' to see available templates", id))?;
            CreationRequest::from_template(name, template)
        }
        None => CreationRequest::blank(name),
    };
    session.start_creation()?;
    let id = session
        .finish_creation(request)
        .with_context(|| format!("Failed to create manual '{}'", name))?;
    session.go_home();
    println!("✓ Created manual '{}' ({})", name, id);
    Ok(())
}

/// Handle the templates list command
fn handle_list_templates(session: &Session<FileStore>) {
    let by_category = session
        .templates()
        .iter()
        .sorted_by(|a, b| a.category.cmp(&b.category))
        .chunk_by(|t| t.category.clone());

    for (category, templates) in &by_category {
        println!("{}:", category);
        for template in templates {
            let tags = if template.tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", template.tags.iter().join(", "))
            };
            println!("  {} - {}{}", template.id, template.name, tags);
        }
        println!();
    }
    println!("Usage: manualcraft projects create <name> --template <id>");
}

/// Handle the page import-table command
fn handle_import_table(
    session: &mut Session<FileStore>,
    project: &str,
    path: &Path,
    page: usize,
) -> Result<()> {
    let file = fs::File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let table = TableProps::from_csv_reader(file)
        .with_context(|| format!("Failed to parse CSV {}", path.display()))?;
    let rows = table.rows.len();
    edit_project(session, project, |editor| {
        let index = page.checked_sub(1).context("Page numbers start at 1")?;
        if index >= editor.state().pages.len() {
            anyhow::bail!("Manual has only {} pages", editor.state().pages.len());
        }
        editor.switch_page(index);
        let size = ComponentType::Table.default_size();
        let drop_point = Point::new(40.0 + size.width / 2.0, 40.0 + size.height / 2.0);
        let id = editor
            .add_component(
                ComponentType::Table,
                Section::Body,
                drop_point,
                Some(ComponentProps::Table(table)),
            )
            .context("Table was not added")?;
        println!("✓ Added table {} with {} rows to page {}", id, rows, page);
        Ok(())
    })
}

/// Handle the asset add-image command
fn handle_add_image(session: &mut Session<FileStore>, project: &str, path: &Path) -> Result<()> {
    let image = manualcraft::ingest::ingest_file(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    edit_project(session, project, |editor| {
        let id = editor
            .add_user_image(image.data_uri)
            .context("Image was not added")?;
        println!("✓ Added image {}", id);
        if let Some(size) = image.natural_size {
            println!("  {}x{} px", size.width, size.height);
        }
        Ok(())
    })
}

/// Ask a yes/no question on the terminal
fn prompt(message: &str) -> bool {
    print!("{} [y/N] ", message);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
