//! Map configuration: where the boundary and activity files live.
//!
//! A default config is embedded in the binary. A config file given on the
//! command line replaces it entirely; relative paths inside a config file
//! are resolved against the file's directory.

use std::path::{Path, PathBuf};

use collab_map_geography::BoundarySource;
use collab_map_records::RecordSource;
use serde::Deserialize;

const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// The `[boundaries]` and `[records]` tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapConfig {
    pub boundaries: BoundarySource,
    pub records: RecordSource,
}

impl MapConfig {
    /// The embedded default config. Paths are relative to the working
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded TOML does not parse.
    pub fn embedded() -> Result<Self, toml::de::Error> {
        toml::de::from_str(DEFAULT_CONFIG_TOML)
    }

    /// Reads a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// config.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        let mut config: Self = toml::de::from_str(&text)
            .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;

        if let Some(dir) = path.parent() {
            config.boundaries.path = resolve(dir, &config.boundaries.path);
            config.records.path = resolve(dir, &config.records.path);
        }

        Ok(config)
    }

    /// The config at `path`, or the embedded default when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected config cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(path) => {
                log::info!("Using config {}", path.display());
                Self::from_file(path)
            }
            None => {
                log::debug!("Using embedded default config");
                Ok(Self::embedded()?)
            }
        }
    }
}

fn resolve(dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}
