//! Generated content reconciliation
//!
//! Page-number stamps are derived from the document settings and the page
//! list. Whenever one of their inputs changes, every previously generated
//! stamp is removed and a fresh one is appended to each page footer. Stamp
//! ids are derived from page ids, so repeated passes produce identical output.

use crate::document_model::{
    Alignment, Component, ComponentProps, DocumentSettings, EditorState, TextProps,
};

/// Id prefix marking generated page-number components
pub const PAGE_NUMBER_ID_PREFIX: &str = "auto-pagenumber-";

/// Geometry used to place page-number stamps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Full printable page width
    pub page_width: f64,
    /// Horizontal inset of left- and right-aligned stamps
    pub margin: f64,
    /// Width of left- and right-aligned stamps
    pub stamp_width: f64,
    pub stamp_height: f64,
    /// Gap between the stamp and the bottom of the footer band
    pub bottom_gap: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 816.0,
            margin: 40.0,
            stamp_width: 150.0,
            stamp_height: 20.0,
            bottom_gap: 5.0,
        }
    }
}

/// Every input the page-number stamps depend on
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContentKey {
    show_page_numbers: bool,
    page_ids: Vec<String>,
    footer_height: f64,
    align: Alignment,
    color: String,
    font_size: f64,
    format: String,
}

impl GeneratedContentKey {
    pub fn of(state: &EditorState) -> Self {
        let settings = &state.document_settings;
        Self {
            show_page_numbers: settings.show_page_numbers,
            page_ids: state.pages.iter().map(|p| p.id.clone()).collect(),
            footer_height: settings.footer_height,
            align: settings.page_number_align,
            color: settings.page_number_color.clone(),
            font_size: settings.page_number_font_size,
            format: settings.page_number_format.clone(),
        }
    }
}

/// Whether a component is a generated page-number stamp
pub fn is_page_number(component: &Component) -> bool {
    component.is_generated && component.id.starts_with(PAGE_NUMBER_ID_PREFIX)
}

/// Id of the page-number stamp belonging to a page
pub fn page_number_id(page_id: &str) -> String {
    format!("{}{}", PAGE_NUMBER_ID_PREFIX, page_id)
}

/// Rebuild the page-number stamps of every page
///
/// User components are left in place and keep their order.
pub fn reconcile(state: &mut EditorState, geometry: &PageGeometry) {
    let mut removed = 0;
    for page in &mut state.pages {
        let before = page.content.footer.len();
        page.content.footer.retain(|c| !is_page_number(c));
        removed += before - page.content.footer.len();
    }

    if !state.document_settings.show_page_numbers {
        log::debug!("Removed {} page-number stamps", removed);
        return;
    }

    let total_pages = state.pages.len();
    let settings = state.document_settings.clone();
    for (index, page) in state.pages.iter_mut().enumerate() {
        let stamp = page_number_stamp(&page.id, index + 1, total_pages, &settings, geometry);
        page.content.footer.push(stamp);
    }
    log::debug!(
        "Replaced {} page-number stamps with {}",
        removed,
        total_pages
    );
}

/// Reconcile only if an input changed since `previous` was taken
///
/// # Returns
/// * `true` - The stamps were rebuilt
/// * `false` - Nothing relevant changed
pub fn reconcile_if_changed(
    previous: &GeneratedContentKey,
    state: &mut EditorState,
    geometry: &PageGeometry,
) -> bool {
    if *previous == GeneratedContentKey::of(state) {
        return false;
    }
    reconcile(state, geometry);
    true
}

fn page_number_stamp(
    page_id: &str,
    current_page: usize,
    total_pages: usize,
    settings: &DocumentSettings,
    geometry: &PageGeometry,
) -> Component {
    let (x, width) = match settings.page_number_align {
        Alignment::Left => (geometry.margin, geometry.stamp_width),
        Alignment::Center => (0.0, geometry.page_width),
        Alignment::Right => (
            geometry.page_width - geometry.stamp_width - geometry.margin,
            geometry.stamp_width,
        ),
    };

    let props = TextProps {
        text: settings.format_page_number(current_page, total_pages),
        font_size: settings.page_number_font_size,
        color: settings.page_number_color.clone(),
        text_align: settings.page_number_align,
        ..TextProps::default()
    };

    Component {
        id: page_number_id(page_id),
        x,
        y: settings.footer_height - geometry.stamp_height - geometry.bottom_gap,
        width,
        height: geometry.stamp_height,
        props: ComponentProps::Text(props),
        is_generated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::{ComponentType, Page, Point};

    fn three_pages() -> EditorState {
        let pages = (1..=3)
            .map(|i| Page::blank(format!("page-{}", i), format!("Page {}", i)))
            .collect();
        let mut state = EditorState::with_pages("Manual", pages, Vec::new());
        state.document_settings.show_page_numbers = true;
        state
    }

    fn stamp_text(state: &EditorState, page: usize) -> String {
        state.pages[page]
            .content
            .footer
            .iter()
            .find(|c| is_page_number(c))
            .and_then(|c| c.props.as_text())
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_stamps_every_page() {
        let mut state = three_pages();
        reconcile(&mut state, &PageGeometry::default());
        assert_eq!(stamp_text(&state, 0), "Page 1 of 3");
        assert_eq!(stamp_text(&state, 2), "Page 3 of 3");
        let stamp = &state.pages[1].content.footer[0];
        assert_eq!(stamp.id, "auto-pagenumber-page-2");
        assert!(stamp.is_generated);
        assert_eq!(stamp.x, 816.0 - 150.0 - 40.0);
        assert_eq!(stamp.y, 80.0 - 20.0 - 5.0);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut state = three_pages();
        let geometry = PageGeometry::default();
        reconcile(&mut state, &geometry);
        let once = state.clone();
        reconcile(&mut state, &geometry);
        assert_eq!(state, once);
        assert_eq!(state.pages[0].content.footer.len(), 1);
    }

    #[test]
    fn test_user_footer_components_survive() {
        let mut state = three_pages();
        state.pages[0].content.footer.push(Component::new(
            "Text-user",
            Point::new(0.0, 0.0),
            ComponentType::Text.default_size(),
            ComponentProps::defaults_for(ComponentType::Text),
        ));
        let geometry = PageGeometry::default();
        reconcile(&mut state, &geometry);
        state.document_settings.show_page_numbers = false;
        reconcile(&mut state, &geometry);
        let footer = &state.pages[0].content.footer;
        assert_eq!(footer.len(), 1);
        assert_eq!(footer[0].id, "Text-user");
    }

    #[test]
    fn test_alignment_geometry() {
        let geometry = PageGeometry::default();
        let mut state = three_pages();

        state.document_settings.page_number_align = Alignment::Center;
        reconcile(&mut state, &geometry);
        let stamp = &state.pages[0].content.footer[0];
        assert_eq!((stamp.x, stamp.width), (0.0, 816.0));

        state.document_settings.page_number_align = Alignment::Left;
        reconcile(&mut state, &geometry);
        let stamp = &state.pages[0].content.footer[0];
        assert_eq!((stamp.x, stamp.width), (40.0, 150.0));
        assert_eq!(
            stamp.props.as_text().map(|t| t.text_align),
            Some(Alignment::Left)
        );
    }

    #[test]
    fn test_reconcile_if_changed_tracks_inputs() {
        let geometry = PageGeometry::default();
        let mut state = three_pages();
        let key = GeneratedContentKey::of(&state);
        assert!(!reconcile_if_changed(&key, &mut state, &geometry));

        state.document_settings.page_number_format = "{currentPage}".to_string();
        assert!(reconcile_if_changed(&key, &mut state, &geometry));
        assert_eq!(stamp_text(&state, 1), "2");
    }
}
