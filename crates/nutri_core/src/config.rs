use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NutriConfig {
    pub assistant: AssistantConfig,
    pub bridge: BridgeConfig,
    pub voice: VoiceTimingConfig,
    pub gateway: GatewayConfig,
    pub storage: StorageConfig,
}

impl NutriConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: NutriConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("NUTRI_CHAT_URL") {
            self.bridge.chat_url = Some(v);
        }
        if let Ok(v) = std::env::var("NUTRI_TTS_URL") {
            self.bridge.tts_url = Some(v);
        }
        if let Ok(v) = std::env::var("NUTRI_PROFILE_URL") {
            self.bridge.profile_url = Some(v);
        }
        if let Ok(v) = std::env::var("NUTRI_USE_REMOTE_CHAT") {
            self.assistant.use_remote_chat = matches!(v.as_str(), "1" | "true" | "yes");
        }
        if let Ok(v) = std::env::var("NUTRI_SEED") {
            if let Ok(n) = v.parse() {
                self.assistant.seed = Some(n);
            }
        }
        if let Ok(v) = std::env::var("OPENAI_MODEL") {
            self.gateway.llm.model = v;
        }
        if let Ok(v) = std::env::var("OPENAI_BASE_URL") {
            self.gateway.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("ELEVENLABS_BASE_URL") {
            self.gateway.tts.base_url = v;
        }
        if let Ok(v) = std::env::var("ELEVENLABS_VOICE_FEMALE") {
            self.gateway.tts.voice_female = Some(v);
        }
        if let Ok(v) = std::env::var("ELEVENLABS_VOICE_MALE") {
            self.gateway.tts.voice_male = Some(v);
        }
        if let Ok(v) = std::env::var("GATEWAY_HOST") {
            self.gateway.host = v;
        }
        if let Ok(v) = std::env::var("GATEWAY_PORT") {
            if let Ok(n) = v.parse() {
                self.gateway.port = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Answer through the remote chat bridge instead of local templates.
    pub use_remote_chat: bool,
    /// Seed for template selection; unset means a fresh thread RNG.
    pub seed: Option<u64>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            use_remote_chat: false,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub chat_url: Option<String>,
    pub tts_url: Option<String>,
    pub profile_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            chat_url: None,
            tts_url: None,
            profile_url: None,
            timeout_secs: 30,
        }
    }
}

/// Delays around speech playback and recognition restarts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoiceTimingConfig {
    /// Pause after playback before the microphone is reopened.
    pub resume_delay_ms: u64,
    /// Debounce before restarting a recognizer that stopped on its own.
    pub restart_delay_ms: u64,
    /// Delay between the welcome line and the first listen.
    pub listen_start_delay_ms: u64,
    /// Short silence before each utterance is synthesized.
    pub lead_in_ms: u64,
}

impl Default for VoiceTimingConfig {
    fn default() -> Self {
        Self {
            resume_delay_ms: 500,
            restart_delay_ms: 500,
            listen_start_delay_ms: 1500,
            lead_in_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub llm: GatewayLlmConfig,
    pub tts: GatewayTtsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            llm: GatewayLlmConfig::default(),
            tts: GatewayTtsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayLlmConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GatewayLlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.8,
            max_tokens: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayTtsConfig {
    pub base_url: String,
    pub model_id: String,
    pub voice_female: Option<String>,
    pub voice_male: Option<String>,
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for GatewayTtsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            voice_female: None,
            voice_male: None,
            stability: 0.5,
            similarity_boost: 0.8,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Local preference cache. Defaults to the platform data dir.
    pub preferences_path: Option<PathBuf>,
    /// Where synthesized audio from the remote TTS bridge is written.
    pub audio_dir: Option<PathBuf>,
}

// ============================================================================
// Tests
// ============================================================================
