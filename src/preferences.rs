//! Persisted user preferences (currently just the theme)

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
}

#[derive(thiserror::Error, Debug)]
pub enum PreferencesError {
    #[error("Failed to access preferences: {0}")]
    Io(#[from] std::io::Error),
    #[error("Preferences file corrupted: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Default location: `<config dir>/skycast/preferences.json`.
pub fn default_path(config_dir: Option<&Path>) -> PathBuf {
    config_dir
        .map(Path::to_path_buf)
        .or_else(|| dirs_next::config_dir().map(|dir| dir.join("skycast")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PREFERENCES_FILE)
}

/// A missing file yields the defaults.
pub fn load(path: &Path) -> Result<Preferences, PreferencesError> {
    match std::fs::read_to_string(path) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Preferences::default()),
        Err(e) => Err(e.into()),
    }
}

pub async fn save(path: &Path, preferences: &Preferences) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(preferences)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
