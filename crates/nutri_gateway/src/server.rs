use crate::error::{ApiError, ErrorReply, CHAT_FALLBACK};
use crate::llm::{LlmClient, OpenAiClient};
use crate::prompts::PromptBuilder;
use crate::tts::{ElevenLabsClient, SpeechProvider};
use crate::types::{ChatPayload, ChatResponse, SpeechPayload, SpeechResponse};
use anyhow::Result;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use base64::Engine;
use nutri_core::config::GatewayConfig;
use nutri_core::Gender;
use std::env;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state for the route handlers.
#[derive(Clone)]
struct AppState {
    /// `None` when `OPENAI_API_KEY` is unset.
    llm: Option<Arc<dyn LlmClient>>,
    /// `None` when `ELEVENLABS_API_KEY` is unset.
    speech: Option<Arc<dyn SpeechProvider>>,
    voice_female: Option<String>,
    voice_male: Option<String>,
}

impl AppState {
    fn voice_for(&self, gender: Gender) -> Option<&str> {
        match gender {
            Gender::Female => self.voice_female.as_deref(),
            Gender::Male => self.voice_male.as_deref(),
        }
    }
}

/// The NutriAI backend HTTP server.
///
/// - `POST /nutri-ai-chat`: LLM reply for a conversation
/// - `POST /text-to-speech`: base64 audio for a sentence
/// - `GET /health`: health check
pub struct GatewayServer {
    state: AppState,
    host: String,
    port: u16,
}

impl GatewayServer {
    /// A server with explicit upstream clients. Missing clients make the
    /// matching endpoint answer with a configuration error.
    pub fn new(
        config: &GatewayConfig,
        llm: Option<Arc<dyn LlmClient>>,
        speech: Option<Arc<dyn SpeechProvider>>,
    ) -> Self {
        Self {
            state: AppState {
                llm,
                speech,
                voice_female: config.tts.voice_female.clone(),
                voice_male: config.tts.voice_male.clone(),
            },
            host: config.host.clone(),
            port: config.port,
        }
    }

    /// Build upstream clients from config plus `OPENAI_API_KEY` and
    /// `ELEVENLABS_API_KEY` in the environment.
    pub fn from_env(config: &GatewayConfig) -> Result<Self> {
        let llm = match env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()) {
            Some(key) => Some(Arc::new(OpenAiClient::new(&config.llm, key)?) as Arc<dyn LlmClient>),
            None => {
                tracing::warn!("OPENAI_API_KEY not set; /nutri-ai-chat will fail");
                None
            }
        };
        let speech = match env::var("ELEVENLABS_API_KEY").ok().filter(|k| !k.is_empty()) {
            Some(key) => Some(
                Arc::new(ElevenLabsClient::new(&config.tts, key)?) as Arc<dyn SpeechProvider>
            ),
            None => {
                tracing::warn!("ELEVENLABS_API_KEY not set; /text-to-speech will fail");
                None
            }
        };
        Ok(Self::new(config, llm, speech))
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/nutri-ai-chat", post(chat))
            .route("/text-to-speech", post(text_to_speech))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Start the server. This spawns a background task and returns the join handle.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        let app = self.router();
        let addr = self.address();

        tokio::spawn(async move {
            let listener = match tokio::net::TcpListener::bind(&addr).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!("Gateway failed to bind {}: {}", addr, e);
                    return;
                }
            };
            tracing::info!("Gateway listening on {}", addr);
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Gateway server error: {}", e);
            }
        })
    }
}

// ============================================================================
// Route handlers
// ============================================================================

async fn health() -> &'static str {
    "ok"
}

/// POST /nutri-ai-chat
///
/// Every failure is a 500 whose body also carries a sentence the client can
/// say instead.
async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatPayload>,
) -> Result<Json<ChatResponse>, ErrorReply> {
    tracing::info!(
        "Chat request: user={:?} intent={:?} turns={}",
        payload.user_name,
        payload.intent,
        payload.messages.len()
    );

    let llm = state
        .llm
        .as_ref()
        .ok_or_else(|| ApiError::NotConfigured("OPENAI_API_KEY".into()).with_fallback(CHAT_FALLBACK))?;

    let system =
        PromptBuilder::system_prompt(payload.user_name.as_deref(), payload.intent.as_deref());
    let message = llm
        .complete(&system, &payload.messages)
        .await
        .map_err(|e| ApiError::Upstream(e).with_fallback(CHAT_FALLBACK))?;

    Ok(Json(ChatResponse { message }))
}

/// POST /text-to-speech
///
/// Gender `"female"` picks the female voice; anything else the male one.
async fn text_to_speech(
    State(state): State<AppState>,
    Json(payload): Json<SpeechPayload>,
) -> Result<Json<SpeechResponse>, ApiError> {
    if payload.text.trim().is_empty() {
        return Err(ApiError::MissingField("text"));
    }

    let gender = match payload.gender.as_deref() {
        Some("female") => Gender::Female,
        _ => Gender::Male,
    };
    let voice_id = state
        .voice_for(gender)
        .ok_or_else(|| ApiError::NotConfigured(format!("voice for gender {}", gender)))?;
    let speech = state
        .speech
        .as_ref()
        .ok_or_else(|| ApiError::NotConfigured("ELEVENLABS_API_KEY".into()))?;

    tracing::debug!("Synthesizing {} chars with voice {}", payload.text.len(), voice_id);
    let audio = speech.synthesize(&payload.text, voice_id).await?;

    Ok(Json(SpeechResponse {
        audio_content: base64::engine::general_purpose::STANDARD.encode(audio),
    }))
}
