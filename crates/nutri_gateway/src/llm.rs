use crate::types::ChatTurn;
use anyhow::{Context, Result};
use async_trait::async_trait;
use nutri_core::config::GatewayLlmConfig;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One chat completion: the system prompt followed by the client's turns.
    async fn complete(&self, system: &str, messages: &[ChatTurn]) -> Result<String>;
}

/// OpenAI-compatible `/chat/completions` client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(config: &GatewayLlmConfig, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .context("Failed to build HTTP client")?,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, system: &str, messages: &[ChatTurn]) -> Result<String> {
        let mut openai_messages = Vec::with_capacity(messages.len() + 1);
        openai_messages.push(json!({"role": "system", "content": system}));
        openai_messages.extend(
            messages
                .iter()
                .map(|m| json!({"role": m.role, "content": m.content})),
        );

        let payload = json!({
            "model": self.model,
            "messages": openai_messages,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("Chat completion: {} turns via {}", messages.len(), self.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .context("Failed to send request to OpenAI")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI API error {}: {}", status, error_text);
            anyhow::bail!("OpenAI API error: {}", status.as_u16());
        }

        let resp_json: Value = response
            .json()
            .await
            .context("Malformed OpenAI response")?;
        resp_json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .context("OpenAI response has no message content")
    }
}
