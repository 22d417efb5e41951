use serde::{Deserialize, Serialize};

/// One prior turn as the client sends it; forwarded to the LLM as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

/// Body of `POST /nutri-ai-chat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
    #[serde(default)]
    pub user_name: Option<String>,
    /// Free-form intent label; unknown labels are passed through to the prompt.
    #[serde(default)]
    pub intent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
}

/// Body of `POST /text-to-speech`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechPayload {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    /// Base64 (standard alphabet) MP3 bytes.
    pub audio_content: String,
}
