use anyhow::{Context, Result};
use async_trait::async_trait;
use nutri_core::config::GatewayTtsConfig;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Render `text` with the given voice; returns encoded audio bytes.
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>>;
}

/// ElevenLabs-compatible `/v1/text-to-speech/{voice}` client.
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    client: Client,
    api_key: String,
    base_url: String,
    model_id: String,
    stability: f32,
    similarity_boost: f32,
}

impl ElevenLabsClient {
    pub fn new(config: &GatewayTtsConfig, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .context("Failed to build HTTP client")?,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
            stability: config.stability,
            similarity_boost: config.similarity_boost,
        })
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsClient {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/v1/text-to-speech/{}", self.base_url, voice_id);
        let payload = json!({
            "text": text,
            "model_id": self.model_id,
            "voice_settings": {
                "stability": self.stability,
                "similarity_boost": self.similarity_boost,
            },
        });

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to send request to ElevenLabs")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("ElevenLabs API error: {} - {}", status.as_u16(), error_text);
        }

        let audio = response
            .bytes()
            .await
            .context("Failed to read ElevenLabs audio")?;
        tracing::info!("Audio generated, {} bytes", audio.len());
        Ok(audio.to_vec())
    }
}
