//! Last-used parameters and directory, persisted between runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory the last image was opened from or saved to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_dir: Option<PathBuf>,
    pub config: Config,
}

impl Settings {
    /// Reads settings from `path`, falling back to defaults when the file is
    /// missing or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                if path.exists() {
                    tracing::warn!("Ignoring settings {}: {err:#}", path.display());
                }
                Self::default()
            }
        }
    }

    /// Format follows the extension: `.toml` or `.json`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let format = common::SerdeFormat::from_file_name(path)?;
        let serialized = std::fs::read(path)?;
        common::serde::deserialize(&serialized, format)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let format = common::SerdeFormat::from_file_name(path)?;
        let serialized = common::serde::serialize(self, format)?;
        std::fs::write(path, serialized)?;
        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Records the directory containing `file` as the last-used one.
    pub fn remember_dir(&mut self, file: &Path) {
        if let Some(dir) = common::file_utils::parent_dir(file) {
            self.last_dir = Some(dir);
        }
    }
}
