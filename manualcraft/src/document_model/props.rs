//! Typed property sets for each component variant
//!
//! Every [`ComponentType`] owns exactly one property struct. The pairing is
//! enforced by [`ComponentProps`], which serializes as the `type` tag plus a
//! `props` object so stored documents keep their familiar shape.

use super::table::TableProps;
use super::types::{null_as_default, Alignment, Size};
use serde::{Deserialize, Serialize};

/// Closed set of component variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    Text,
    Image,
    Table,
    Quote,
    List,
    Divider,
    Formula,
    Icon,
    AdvancedBlock,
}

impl ComponentType {
    /// All variants, in component-library order
    pub const ALL: [ComponentType; 9] = [
        ComponentType::Text,
        ComponentType::Image,
        ComponentType::Icon,
        ComponentType::Divider,
        ComponentType::Formula,
        ComponentType::Table,
        ComponentType::Quote,
        ComponentType::List,
        ComponentType::AdvancedBlock,
    ];

    /// Size given to a freshly added component of this type
    pub fn default_size(self) -> Size {
        match self {
            ComponentType::Text => Size::new(200.0, 40.0),
            ComponentType::Image => Size::new(240.0, 180.0),
            ComponentType::Icon => Size::new(50.0, 50.0),
            ComponentType::Divider => Size::new(400.0, 20.0),
            ComponentType::Formula => Size::new(200.0, 50.0),
            ComponentType::Table => Size::new(360.0, 120.0),
            ComponentType::Quote => Size::new(400.0, 100.0),
            ComponentType::List => Size::new(220.0, 100.0),
            ComponentType::AdvancedBlock => Size::new(500.0, 200.0),
        }
    }

    /// Tag used in stored documents and generated ids
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Text => "Text",
            ComponentType::Image => "Image",
            ComponentType::Table => "Table",
            ComponentType::Quote => "Quote",
            ComponentType::List => "List",
            ComponentType::Divider => "Divider",
            ComponentType::Formula => "Formula",
            ComponentType::Icon => "Icon",
            ComponentType::AdvancedBlock => "AdvancedBlock",
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown component type '{}'", s))
    }
}

/// Variant tag together with its property set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props")]
pub enum ComponentProps {
    Text(TextProps),
    Image(ImageProps),
    Table(TableProps),
    Quote(QuoteProps),
    List(ListProps),
    Divider(DividerProps),
    Formula(FormulaProps),
    Icon(IconProps),
    AdvancedBlock(AdvancedBlockProps),
}

impl ComponentProps {
    /// Default property set for a component type
    pub fn defaults_for(kind: ComponentType) -> Self {
        match kind {
            ComponentType::Text => ComponentProps::Text(TextProps::default()),
            ComponentType::Image => ComponentProps::Image(ImageProps::default()),
            ComponentType::Table => ComponentProps::Table(TableProps::default()),
            ComponentType::Quote => ComponentProps::Quote(QuoteProps::default()),
            ComponentType::List => ComponentProps::List(ListProps::default()),
            ComponentType::Divider => ComponentProps::Divider(DividerProps::default()),
            ComponentType::Formula => ComponentProps::Formula(FormulaProps::default()),
            ComponentType::Icon => ComponentProps::Icon(IconProps::default()),
            ComponentType::AdvancedBlock => {
                ComponentProps::AdvancedBlock(AdvancedBlockProps::default())
            }
        }
    }

    /// The variant tag of this property set
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentProps::Text(_) => ComponentType::Text,
            ComponentProps::Image(_) => ComponentType::Image,
            ComponentProps::Table(_) => ComponentType::Table,
            ComponentProps::Quote(_) => ComponentType::Quote,
            ComponentProps::List(_) => ComponentType::List,
            ComponentProps::Divider(_) => ComponentType::Divider,
            ComponentProps::Formula(_) => ComponentType::Formula,
            ComponentProps::Icon(_) => ComponentType::Icon,
            ComponentProps::AdvancedBlock(_) => ComponentType::AdvancedBlock,
        }
    }

    pub fn as_text(&self) -> Option<&TextProps> {
        match self {
            ComponentProps::Text(props) => Some(props),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableProps> {
        match self {
            ComponentProps::Table(props) => Some(props),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut TableProps> {
        match self {
            ComponentProps::Table(props) => Some(props),
            _ => None,
        }
    }
}

/// Semantic role of a text block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    #[default]
    Paragraph,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl TextType {
    /// Font size and weight applied when switching to this text type
    pub fn heading_style(self) -> (f64, FontWeight) {
        match self {
            TextType::Paragraph => (16.0, FontWeight::Normal),
            TextType::H1 => (32.0, FontWeight::Bold),
            TextType::H2 => (28.0, FontWeight::Bold),
            TextType::H3 => (24.0, FontWeight::Bold),
            TextType::H4 => (20.0, FontWeight::Bold),
            TextType::H5 => (18.0, FontWeight::Bold),
            TextType::H6 => (16.0, FontWeight::Bold),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

/// Properties of a text block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub text: String,
    pub text_type: TextType,
    #[serde(deserialize_with = "null_as_default")]
    pub font_size: f64,
    pub color: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_align: Alignment,
    pub text_decoration_line: TextDecoration,
    #[serde(deserialize_with = "null_as_default")]
    pub line_height: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub letter_spacing: f64,
    pub text_transform: String,
    pub background_color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub padding: f64,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: "Type here...".to_string(),
            text_type: TextType::Paragraph,
            font_size: 16.0,
            color: "#334155".to_string(),
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            text_align: Alignment::Left,
            text_decoration_line: TextDecoration::None,
            line_height: 1.5,
            letter_spacing: 0.0,
            text_transform: "none".to_string(),
            background_color: "transparent".to_string(),
            padding: 0.0,
        }
    }
}

impl TextProps {
    /// Switch the text type, applying its heading font size and weight
    pub fn set_text_type(&mut self, text_type: TextType) {
        let (font_size, font_weight) = text_type.heading_style();
        self.text_type = text_type;
        self.font_size = font_size;
        self.font_weight = font_weight;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
    None,
}

/// Placeholder shown until the user picks an image
pub const PLACEHOLDER_IMAGE_SRC: &str =
    "https://storage.googleapis.com/a1aa/image/aenPS3fkmco8p0BWw22ZceiCZj2vuw887Za1LL7jAat2kirnA.jpg";

/// Properties of an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    /// Image URL or data URI
    pub src: String,
    pub alt: String,
    pub object_fit: ObjectFit,
    #[serde(deserialize_with = "null_as_default")]
    pub opacity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub border_radius: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub border_width: f64,
    pub border_color: String,
    pub box_shadow: bool,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: PLACEHOLDER_IMAGE_SRC.to_string(),
            alt: "placeholder".to_string(),
            object_fit: ObjectFit::Cover,
            opacity: 1.0,
            border_radius: 0.0,
            border_width: 0.0,
            border_color: "#000000".to_string(),
            box_shadow: false,
        }
    }
}

impl ImageProps {
    /// Image properties showing `src` with every other field defaulted
    pub fn with_src(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteType {
    #[default]
    Default,
    Info,
    Success,
    Warning,
    Danger,
}

/// Properties of a quote or callout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteProps {
    pub quote_type: QuoteType,
    pub text: String,
    pub author: String,
}

impl Default for QuoteProps {
    fn default() -> Self {
        Self {
            quote_type: QuoteType::Default,
            text: "This is an inspiring quote about the product.".to_string(),
            author: "A. Customer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    Unordered,
    Ordered,
}

/// Properties of a bulleted or numbered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListProps {
    #[serde(rename = "type")]
    pub list_type: ListType,
    pub items: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub font_size: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub line_spacing: f64,
    pub text_color: String,
}

impl Default for ListProps {
    fn default() -> Self {
        Self {
            list_type: ListType::Unordered,
            items: vec![
                "List item 1".to_string(),
                "List item 2".to_string(),
                "List item 3".to_string(),
            ],
            font_size: 16.0,
            line_spacing: 1.5,
            text_color: "#334155".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Properties of a horizontal divider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DividerProps {
    pub line_style: LineStyle,
    /// Line thickness in pixels
    #[serde(deserialize_with = "null_as_default")]
    pub weight: f64,
    pub color: String,
}

impl Default for DividerProps {
    fn default() -> Self {
        Self {
            line_style: LineStyle::Solid,
            weight: 2.0,
            color: "#cbd5e1".to_string(),
        }
    }
}

/// Properties of a LaTeX formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormulaProps {
    pub formula: String,
    #[serde(deserialize_with = "null_as_default")]
    pub font_size: f64,
    pub color: String,
}

impl Default for FormulaProps {
    fn default() -> Self {
        Self {
            formula: "c = \\sqrt{a^2 + b^2}".to_string(),
            font_size: 20.0,
            color: "#334155".to_string(),
        }
    }
}

/// Properties of an icon glyph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IconProps {
    /// CSS class selecting the glyph
    pub class_name: String,
    pub color: String,
}

impl Default for IconProps {
    fn default() -> Self {
        Self {
            class_name: "fas fa-star".to_string(),
            color: "#334155".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvancedBlockType {
    #[default]
    Code,
    Alert,
    Collapsible,
}

/// Properties of a code, alert or collapsible block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdvancedBlockProps {
    pub block_type: AdvancedBlockType,
    pub code: String,
    pub language: String,
    pub collapsible_title: String,
    pub collapsible_content: String,
    pub is_collapsed: bool,
}

impl Default for AdvancedBlockProps {
    fn default() -> Self {
        Self {
            block_type: AdvancedBlockType::Code,
            code: "console.log(\"Hello, World!\");".to_string(),
            language: "javascript".to_string(),
            collapsible_title: "Click to Expand".to_string(),
            collapsible_content: "This is the hidden content that will be revealed.".to_string(),
            is_collapsed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_type() {
        for kind in ComponentType::ALL {
            assert_eq!(ComponentProps::defaults_for(kind).component_type(), kind);
        }
    }

    #[test]
    fn test_props_serialize_with_type_tag() {
        let props = ComponentProps::Icon(IconProps::default());
        let value = serde_json::to_value(&props).unwrap();
        assert_eq!(value["type"], "Icon");
        assert_eq!(value["props"]["className"], "fas fa-star");
    }

    #[test]
    fn test_partial_props_fill_defaults() {
        let json = r#"{"type":"Text","props":{"text":"Updated"}}"#;
        let props: ComponentProps = serde_json::from_str(json).unwrap();
        let text = props.as_text().unwrap();
        assert_eq!(text.text, "Updated");
        assert_eq!(text.font_size, 16.0);
        assert_eq!(text.text_align, Alignment::Left);
    }

    #[test]
    fn test_list_type_keeps_original_key() {
        let value = serde_json::to_value(ListProps::default()).unwrap();
        assert_eq!(value["type"], "unordered");
        assert_eq!(value["lineSpacing"], 1.5);
    }

    #[test]
    fn test_set_text_type_applies_heading_style() {
        let mut text = TextProps::default();
        text.set_text_type(TextType::H2);
        assert_eq!(text.font_size, 28.0);
        assert_eq!(text.font_weight, FontWeight::Bold);

        text.set_text_type(TextType::Paragraph);
        assert_eq!(text.font_size, 16.0);
        assert_eq!(text.font_weight, FontWeight::Normal);
    }

    #[test]
    fn test_component_type_from_str() {
        assert_eq!(
            "advancedblock".parse::<ComponentType>(),
            Ok(ComponentType::AdvancedBlock)
        );
        assert_eq!("Table".parse::<ComponentType>(), Ok(ComponentType::Table));
        assert!("Chart".parse::<ComponentType>().is_err());
    }
}
