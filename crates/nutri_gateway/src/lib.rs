//! NutriAI backend: proxies chat turns to an OpenAI-compatible LLM with the
//! NutriAI system prompt, and text to an ElevenLabs-compatible TTS service.

pub mod error;
pub mod llm;
pub mod prompts;
pub mod server;
pub mod tts;
pub mod types;

pub use error::ApiError;
pub use llm::{LlmClient, OpenAiClient};
pub use server::GatewayServer;
pub use tts::{ElevenLabsClient, SpeechProvider};
pub use types::{ChatPayload, ChatResponse, ChatTurn, SpeechPayload, SpeechResponse};
