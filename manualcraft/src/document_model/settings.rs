//! Document-wide layout settings

use super::types::{null_as_default, Alignment};
use serde::{Deserialize, Serialize};

/// Default page-number format
pub const DEFAULT_PAGE_NUMBER_FORMAT: &str = "Page {currentPage} of {totalPages}";

/// Margins, header/footer bands and automatic page numbering
///
/// Missing fields in stored documents fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentSettings {
    pub show_headers: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub header_height: f64,
    pub header_background_image: Option<String>,
    pub header_background_image_align: Alignment,
    pub show_footers: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub footer_height: f64,
    pub footer_background_image: Option<String>,
    pub footer_background_image_align: Alignment,
    pub show_page_numbers: bool,
    /// Supports the `{currentPage}` and `{totalPages}` placeholders
    pub page_number_format: String,
    pub page_number_align: Alignment,
    #[serde(deserialize_with = "null_as_default")]
    pub page_number_font_size: f64,
    pub page_number_color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub page_margin_left: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub page_margin_right: f64,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            show_headers: true,
            header_height: 100.0,
            header_background_image: None,
            header_background_image_align: Alignment::Center,
            show_footers: true,
            footer_height: 80.0,
            footer_background_image: None,
            footer_background_image_align: Alignment::Center,
            show_page_numbers: false,
            page_number_format: DEFAULT_PAGE_NUMBER_FORMAT.to_string(),
            page_number_align: Alignment::Right,
            page_number_font_size: 10.0,
            page_number_color: "#4a5568".to_string(),
            page_margin_left: 40.0,
            page_margin_right: 40.0,
        }
    }
}

impl DocumentSettings {
    /// Render the page-number text for a 1-based page of `total_pages`
    pub fn format_page_number(&self, current_page: usize, total_pages: usize) -> String {
        self.page_number_format
            .replace("{currentPage}", &current_page.to_string())
            .replace("{totalPages}", &total_pages.to_string())
    }
}
