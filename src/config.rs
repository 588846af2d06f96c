//! YAML configuration: scenes and the color palette.
//!
//! ```yaml
//! version: 1
//! scenes:
//!   - identifier: overview
//!     draw_wait: 100
//!     full_refresh_wait: 1000
//!     widgets:
//!       - { module: "0", view: chart, operation: draw, params: { width: 300 } }
//! colors:
//!   scheme: ["#1f77b4", "#ff7f0e"]
//!   default_assigned: "#ff69b4"
//!   fixed: { ruby: "#ff0000" }
//! ```

use crate::color::palette::{CATEGORY10, DEFAULT_ASSIGNED, DEFAULT_UNASSIGNED};
use crate::color::{ColorPalette, Rgba};
use crate::error::{Error, Result};
use crate::scene::{validate_scenes, Scene};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Color allocation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorsConfig {
    /// Ordered scheme colors are drawn from.
    #[serde(default = "default_scheme")]
    pub scheme: Vec<Rgba>,

    /// Color bound to keys once a unique pool is exhausted.
    #[serde(default = "default_assigned")]
    pub default_assigned: Rgba,

    /// Color reported for keys without a unique color.
    #[serde(default = "default_unassigned")]
    pub default_unassigned: Rgba,

    /// Fixed colors by key (case-insensitive).
    #[serde(default)]
    pub fixed: BTreeMap<String, Rgba>,
}

fn default_scheme() -> Vec<Rgba> {
    CATEGORY10.to_vec()
}
fn default_assigned() -> Rgba {
    DEFAULT_ASSIGNED
}
fn default_unassigned() -> Rgba {
    DEFAULT_UNASSIGNED
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            default_assigned: default_assigned(),
            default_unassigned: default_unassigned(),
            fixed: BTreeMap::new(),
        }
    }
}

impl ColorsConfig {
    /// Builds the palette these settings describe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] for an empty scheme.
    pub fn to_palette(&self) -> Result<ColorPalette> {
        if self.scheme.is_empty() {
            return Err(Error::ConfigInvalid {
                key: "colors.scheme".to_string(),
                message: "scheme must contain at least one color".to_string(),
            });
        }

        let palette = self.fixed.iter().fold(
            ColorPalette::new(self.scheme.clone())
                .with_default_assigned(self.default_assigned)
                .with_default_unassigned(self.default_unassigned),
            |palette, (key, color)| palette.with_fixed(key, *color),
        );
        Ok(palette)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Scenes; the first one starts current.
    #[serde(default)]
    pub scenes: Vec<Scene>,

    /// Color settings.
    #[serde(default)]
    pub colors: ColorsConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            scenes: Vec::new(),
            colors: ColorsConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content =
            std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        tracing::debug!(path = %path.display(), "loading configuration");
        Self::parse(&content)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or
    /// [`Error::ConfigInvalid`] / a scene error if validation fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::ConfigInvalid {
                key: "version".to_string(),
                message: format!("unsupported version {}", self.version),
            });
        }
        validate_scenes(&self.scenes)?;
        self.colors.to_palette().map(|_| ())
    }

    /// The palette described by the `colors` section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] for an empty scheme.
    pub fn palette(&self) -> Result<ColorPalette> {
        self.colors.to_palette()
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// The per-user configuration file, `<config dir>/vizscene/config.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vizscene").join("config.yaml"))
    }
}
