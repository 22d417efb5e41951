//! Remote chat bridge.

use anyhow::{Context, Result};
use async_trait::async_trait;
use nutri_core::{IntentKind, Message, Role};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// One history entry in the wire format expected by the chat backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for ChatTurn {
    fn from(m: &Message) -> Self {
        Self {
            role: m.role,
            content: m.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<IntentKind>,
}

impl ChatRequest {
    pub fn new(history: &[Message], user_name: Option<&str>, intent: IntentKind) -> Self {
        Self {
            messages: history.iter().map(ChatTurn::from).collect(),
            user_name: user_name.unwrap_or_default().to_string(),
            intent: Some(intent),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    message: String,
}

/// Produces an assistant reply for the whole conversation so far.
#[async_trait]
pub trait ChatBridge: Send + Sync {
    async fn reply(&self, request: &ChatRequest) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpChatBridge {
    client: Client,
    url: String,
}

impl HttpChatBridge {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ChatBridge for HttpChatBridge {
    async fn reply(&self, request: &ChatRequest) -> Result<String> {
        tracing::debug!(
            "Chat request: {} messages, intent {:?}",
            request.messages.len(),
            request.intent
        );
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .context("Failed to reach chat backend")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Chat backend error ({}): {}",
                status,
                body.chars().take(200).collect::<String>()
            );
        }

        let reply: ChatReply = response
            .json()
            .await
            .context("Malformed chat backend response")?;
        Ok(reply.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bridge(server: &MockServer) -> HttpChatBridge {
        HttpChatBridge::new(
            crate::build_client(5).unwrap(),
            format!("{}/nutri-ai-chat", server.uri()),
        )
    }

    #[test]
    fn test_request_wire_format() {
        let history = vec![Message::assistant("Qual é o seu nome?"), Message::user("Carla")];
        let req = ChatRequest::new(&history, Some("Carla"), IntentKind::SetName);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({
                "messages": [
                    {"role": "assistant", "content": "Qual é o seu nome?"},
                    {"role": "user", "content": "Carla"}
                ],
                "userName": "Carla",
                "intent": "set_name"
            })
        );
    }

    #[tokio::test]
    async fn test_reply_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/nutri-ai-chat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Oi! 😊 Bora comer bem?"})),
            )
            .mount(&server)
            .await;

        let req = ChatRequest::new(&[Message::user("oi")], None, IntentKind::Greeting);
        let reply = bridge(&server).reply(&req).await.unwrap();
        assert_eq!(reply, "Oi! 😊 Bora comer bem?");

        let received = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(body["intent"], "greeting");
        assert_eq!(body["userName"], "");
    }

    #[tokio::test]
    async fn test_reply_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .mount(&server)
            .await;

        let req = ChatRequest::new(&[Message::user("oi")], None, IntentKind::Greeting);
        let err = bridge(&server).reply(&req).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_reply_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let req = ChatRequest::new(&[Message::user("oi")], None, IntentKind::Greeting);
        assert!(bridge(&server).reply(&req).await.is_err());
    }
}
