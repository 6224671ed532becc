//! Document model for manuals, pages, components and templates
//!
//! These are the value types flowing through the editor. They serialize to
//! the JSON shape used by the persisted `manualProjects` and
//! `customTemplates` collections and round-trip through it unchanged.

mod assets;
mod component;
mod editor_state;
mod ids;
mod page;
mod project;
mod props;
mod settings;
mod table;
mod template;
mod types;
mod validation;

pub use assets::{default_icons, AssetIcon, AssetImage, Assets, BrandKit};
pub use component::{Component, ComponentUpdate, MIN_COMPONENT_EXTENT};
pub use editor_state::{EditorState, DEFAULT_GRID_SIZE};
pub use ids::{new_id, now_millis};
pub use page::{Page, PageContent, Section};
pub use project::Project;
pub use props::{
    AdvancedBlockProps, AdvancedBlockType, ComponentProps, ComponentType, DividerProps,
    FontStyle, FontWeight, FormulaProps, IconProps, ImageProps, LineStyle, ListProps, ListType,
    ObjectFit, QuoteProps, QuoteType, TextDecoration, TextProps, TextType, PLACEHOLDER_IMAGE_SRC,
};
pub use settings::{DocumentSettings, DEFAULT_PAGE_NUMBER_FORMAT};
pub use table::{CellRef, CoverageGrid, PlacedCell, SpanKind, TableCell, TableLayout, TableProps};
pub use template::{Template, TemplateProperties, CUSTOM_CATEGORY};
pub use types::{snap_to_grid, Alignment, Point, Size};
pub use validation::ValidationError;
