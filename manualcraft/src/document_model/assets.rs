//! Per-session resource pool: uploaded images, icon palette and brand kit

use serde::{Deserialize, Serialize};

/// An image uploaded by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetImage {
    pub id: String,
    /// Data URI of the image
    pub src: String,
}

/// An entry of the icon palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIcon {
    pub id: String,
    pub name: String,
    pub class_name: String,
}

impl AssetIcon {
    fn new(id: &str, name: &str, class_name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            class_name: class_name.to_string(),
        }
    }
}

/// Brand resources offered in color and font pickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandKit {
    pub logo: Option<String>,
    pub colors: Vec<String>,
    pub fonts: Vec<String>,
}

impl Default for BrandKit {
    fn default() -> Self {
        Self {
            logo: None,
            colors: ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#6b7280"]
                .map(String::from)
                .to_vec(),
            fonts: ["Inter", "Roboto", "Lato", "Montserrat"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assets {
    #[serde(default)]
    pub images: Vec<AssetImage>,
    #[serde(default)]
    pub icons: Vec<AssetIcon>,
    #[serde(default)]
    pub brand_kit: BrandKit,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            icons: default_icons(),
            brand_kit: BrandKit::default(),
        }
    }
}

impl Assets {
    pub fn icon(&self, id: &str) -> Option<&AssetIcon> {
        self.icons.iter().find(|icon| icon.id == id)
    }

    pub fn image(&self, id: &str) -> Option<&AssetImage> {
        self.images.iter().find(|image| image.id == id)
    }
}

/// The fixed icon palette every new session starts with
pub fn default_icons() -> Vec<AssetIcon> {
    vec![
        AssetIcon::new("icon-info", "Info Circle", "fas fa-info-circle"),
        AssetIcon::new("icon-warning", "Warning Sign", "fas fa-exclamation-triangle"),
        AssetIcon::new("icon-check", "Check Circle", "fas fa-check-circle"),
        AssetIcon::new("icon-tools", "Tools", "fas fa-tools"),
        AssetIcon::new("icon-power", "Power Off", "fas fa-power-off"),
        AssetIcon::new("icon-cog", "Settings Cog", "fas fa-cog"),
        AssetIcon::new("icon-lightbulb", "Lightbulb", "fas fa-lightbulb"),
        AssetIcon::new("icon-question", "Question Circle", "fas fa-question-circle"),
        AssetIcon::new("icon-plug", "Plug", "fas fa-plug"),
    ]
}
