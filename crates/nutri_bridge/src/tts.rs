//! Remote text-to-speech bridge.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use nutri_core::{Gender, VoiceProfile};
use nutri_voice::{AudioSink, QuotaExceeded, Synthesizer};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Error markers the voice backend uses when the key is blocked or out of
/// credits.
const QUOTA_MARKERS: [&str; 2] = ["API_KEY_BLOCKED", "quota_exceeded"];

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    gender: Gender,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpeechReply {
    #[serde(default)]
    audio_content: Option<String>,
}

/// Synthesizes through the backend's `text-to-speech` endpoint and hands the
/// decoded MP3 to an [`AudioSink`].
pub struct RemoteTts {
    client: Client,
    url: String,
    sink: Arc<dyn AudioSink>,
}

impl RemoteTts {
    pub fn new(client: Client, url: impl Into<String>, sink: Arc<dyn AudioSink>) -> Self {
        Self {
            client,
            url: url.into(),
            sink,
        }
    }

    /// Fetch and decode audio without playing it.
    pub async fn fetch_audio(&self, text: &str, gender: Gender) -> Result<Vec<u8>> {
        tracing::debug!("Requesting speech ({}) for {} chars", gender, text.chars().count());
        let response = self
            .client
            .post(&self.url)
            .json(&SpeechRequest { text, gender })
            .send()
            .await
            .context("Failed to reach text-to-speech backend")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let summary = format!(
                "Text-to-speech backend error ({}): {}",
                status,
                body.chars().take(200).collect::<String>()
            );
            if status == StatusCode::TOO_MANY_REQUESTS
                || QUOTA_MARKERS.iter().any(|m| body.contains(m))
            {
                return Err(anyhow::Error::new(QuotaExceeded).context(summary));
            }
            anyhow::bail!(summary);
        }

        let reply: SpeechReply = response
            .json()
            .await
            .context("Malformed text-to-speech response")?;
        let encoded = reply
            .audio_content
            .filter(|a| !a.is_empty())
            .context("No audio content received")?;
        STANDARD
            .decode(encoded.as_bytes())
            .context("Audio content is not valid base64")
    }
}

#[async_trait]
impl Synthesizer for RemoteTts {
    async fn speak(&self, text: &str, voice: &VoiceProfile) -> Result<()> {
        let audio = self.fetch_audio(text, voice.gender).await?;
        self.sink.play(&audio).await
    }

    fn provider_name(&self) -> &'static str {
        "remote-tts"
    }
}
