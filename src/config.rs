use crate::error::{JunctionError, Result};
use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    #[serde(default = "default_unique_tag")]
    pub unique_tag: String,
    #[serde(default)]
    pub min_intron_length: u64,
}

fn default_output_file() -> PathBuf {
    PathBuf::from("output.txt")
}

fn default_unique_tag() -> String {
    "NH:i:1".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
            unique_tag: default_unique_tag(),
            min_intron_length: 0,
        }
    }
}

impl Config {
    /// Location of the per-user config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "splicejunctions", "splice-junctions")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the per-user config. A missing or unreadable file falls back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }
        match Self::from_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Config::default()
            }
        }
    }

    /// Load an explicitly requested config file. Any problem is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| JunctionError::file_access(path, e))?;
        toml::from_str(&content).map_err(|e| JunctionError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
