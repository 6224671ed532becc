//! Editor configuration from manualcraft.toml

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::reconciler::PageGeometry;
use crate::storage::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "manualcraft.toml";

/// Editor configuration from manualcraft.toml
///
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Directory holding the persisted collections
    pub storage_dir: PathBuf,

    /// Undo steps kept per session
    pub history_limit: usize,

    /// Theme used until one has been stored
    pub preferred_theme: Theme,

    /// Page width used to place generated page numbers
    pub page_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".manualcraft"),
            history_limit: DEFAULT_HISTORY_LIMIT,
            preferred_theme: Theme::Dark,
            page_width: PageGeometry::default().page_width,
        }
    }
}

impl EditorConfig {
    /// Load configuration from a manualcraft.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EditorConfig)` - Successfully loaded configuration
    /// * `Err(ConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::IoError)?;

        let config: EditorConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        Ok(config)
    }

    /// Load the configuration file if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            log::debug!(
                "No configuration at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// Save configuration to a manualcraft.toml file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        fs::write(&path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// Page-number geometry for the configured page width
    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry {
            page_width: self.page_width,
            ..PageGeometry::default()
        }
    }
}

/// Errors that can occur when loading or saving the editor configuration
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
    /// IO error when reading or writing file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    SerializeError(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "TOML serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
