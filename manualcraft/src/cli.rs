//! Command-line interface definitions for manualcraft

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the export command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Portable Document Format
    Pdf,
    /// Standalone HTML page
    Html,
}

/// CLI structure for the manualcraft application
#[derive(Parser)]
#[command(name = "manualcraft")]
#[command(version)]
#[command(about = "Page-layout editor for technical manuals", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./manualcraft.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding saved projects and templates
    #[arg(short, long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for manualcraft
#[derive(Subcommand)]
pub enum Commands {
    /// Manage saved manuals
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Edit the pages of a saved manual
    Page {
        #[command(subcommand)]
        action: PageAction,
    },

    /// Manage the template library
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Manage a manual's uploaded assets
    Asset {
        #[command(subcommand)]
        action: AssetAction,
    },

    /// Show or switch the UI theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Export a manual
    Export {
        /// Project id
        project: String,

        /// Output file path
        #[arg(short, long, default_value = "manual.pdf")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pdf")]
        format: ExportFormat,
    },
}

/// Actions on saved manuals
#[derive(Subcommand)]
pub enum ProjectAction {
    /// List saved manuals
    List,

    /// Show the pages of a manual
    Show {
        /// Project id
        id: String,
    },

    /// Create a manual, blank or from a template
    Create {
        /// Manual name
        name: String,

        /// Template id to start from
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Rename a manual
    Rename {
        /// Project id
        id: String,

        /// New name
        name: String,
    },

    /// Delete a manual
    Delete {
        /// Project id
        id: String,
    },
}

/// Actions on a manual's pages
#[derive(Subcommand)]
pub enum PageAction {
    /// Append a page to a manual
    Add {
        /// Project id
        project: String,

        /// Template id to copy the page from
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Place a table read from a CSV file; the first record is the header row
    ImportTable {
        /// Project id
        project: String,

        /// CSV file
        path: PathBuf,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
}

/// Actions on the template library
#[derive(Subcommand)]
pub enum TemplateAction {
    /// List built-in and custom templates by category
    List,

    /// Delete a custom template from the library and every manual
    Delete {
        /// Template id
        id: String,
    },

    /// Change a custom template's name, category or tags
    Rename {
        /// Template id
        id: String,

        /// New name
        name: String,

        /// New category
        #[arg(long)]
        category: Option<String>,

        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
}

/// Actions on a manual's assets
#[derive(Subcommand)]
pub enum AssetAction {
    /// Upload an image into a manual's asset panel
    AddImage {
        /// Project id
        project: String,

        /// Image file (PNG, JPEG, GIF, WebP or SVG)
        path: PathBuf,
    },
}

/// Theme actions
#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Get,

    /// Switch between light and dark
    Toggle,
}
