//! Locally persisted preferences, used as a read-through cache of the remote
//! profile.

use anyhow::{Context, Result};
use nutri_core::Gender;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.user_gender.is_none() && self.user_name.is_none() && self.onboarding_completed.is_none()
    }
}

/// JSON file holding [`Preferences`].
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/nutri/preferences.json`, or the working directory when the
    /// platform has no data dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("nutri"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("preferences.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read preferences; a missing file yields empty preferences.
    pub async fn load(&self) -> Result<Preferences> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Corrupt preferences file {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read preferences {}", self.path.display())),
        }
    }

    pub async fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write preferences {}", self.path.display()))
    }
}
