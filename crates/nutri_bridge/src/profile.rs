//! Profile lookup and onboarding status.
//!
//! The remote profile is the source of truth. The local preference file is
//! only read when the remote lookup fails, and is refreshed after every
//! successful lookup.

use crate::preferences::{PreferenceStore, Preferences};
use anyhow::{Context, Result};
use async_trait::async_trait;
use nutri_core::{Gender, Persona};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub onboarding_completed: bool,
}

/// Read-only profile lookup by user id. `Ok(None)` means no record.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch(&self, user_id: &str) -> Result<Option<Profile>>;
}

/// `GET {base_url}/{user_id}`; 404 means no record.
#[derive(Debug, Clone)]
pub struct HttpProfileSource {
    client: Client,
    base_url: String,
}

impl HttpProfileSource {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch(&self, user_id: &str) -> Result<Option<Profile>> {
        let url = format!("{}/{}", self.base_url, user_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach profile service")?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => Ok(Some(
                response.json().await.context("Malformed profile response")?,
            )),
            s => anyhow::bail!("Profile service error ({})", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOrigin {
    Remote,
    Cache,
    Anonymous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub name: Option<String>,
    pub gender: Gender,
    pub onboarding_completed: bool,
    pub origin: ProfileOrigin,
}

impl ResolvedProfile {
    pub fn anonymous() -> Self {
        Self {
            name: None,
            gender: Gender::default(),
            onboarding_completed: false,
            origin: ProfileOrigin::Anonymous,
        }
    }

    pub fn first_name(&self) -> Option<&str> {
        self.name.as_deref().and_then(|n| n.split_whitespace().next())
    }

    pub fn persona(&self) -> Persona {
        self.name
            .as_deref()
            .map(Persona::from_display_name)
            .unwrap_or_default()
    }
}

pub struct ProfileResolver {
    source: Option<Arc<dyn ProfileSource>>,
    store: PreferenceStore,
}

impl ProfileResolver {
    pub fn new(source: Option<Arc<dyn ProfileSource>>, store: PreferenceStore) -> Self {
        Self { source, store }
    }

    pub async fn resolve(&self, user_id: Option<&str>) -> ResolvedProfile {
        let Some(user_id) = user_id else {
            return ResolvedProfile::anonymous();
        };

        match &self.source {
            Some(source) => match source.fetch(user_id).await {
                Ok(Some(profile)) => self.from_remote(profile).await,
                Ok(None) => {
                    tracing::info!("No profile for user {}", user_id);
                    ResolvedProfile::anonymous()
                }
                Err(e) => {
                    tracing::warn!("Profile lookup failed, using local cache: {:#}", e);
                    self.from_cache().await
                }
            },
            None => self.from_cache().await,
        }
    }

    async fn from_remote(&self, profile: Profile) -> ResolvedProfile {
        let name = profile.name.filter(|n| !n.trim().is_empty());
        let gender = name
            .as_deref()
            .and_then(|n| n.split_whitespace().next())
            .map(Gender::from_first_name)
            .unwrap_or_default();

        let prefs = Preferences {
            user_gender: Some(gender),
            user_name: name.clone(),
            onboarding_completed: Some(profile.onboarding_completed),
        };
        if let Err(e) = self.store.save(&prefs).await {
            tracing::warn!("Failed to refresh preference cache: {:#}", e);
        }

        ResolvedProfile {
            name,
            gender,
            onboarding_completed: profile.onboarding_completed,
            origin: ProfileOrigin::Remote,
        }
    }

    async fn from_cache(&self) -> ResolvedProfile {
        match self.store.load().await {
            Ok(prefs) if !prefs.is_empty() => ResolvedProfile {
                gender: prefs.user_gender.unwrap_or_else(|| {
                    prefs
                        .user_name
                        .as_deref()
                        .and_then(|n| n.split_whitespace().next())
                        .map(Gender::from_first_name)
                        .unwrap_or_default()
                }),
                name: prefs.user_name,
                onboarding_completed: prefs.onboarding_completed.unwrap_or(false),
                origin: ProfileOrigin::Cache,
            },
            Ok(_) => ResolvedProfile::anonymous(),
            Err(e) => {
                tracing::warn!("Preference cache unreadable: {:#}", e);
                ResolvedProfile::anonymous()
            }
        }
    }
}
