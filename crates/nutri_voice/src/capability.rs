//! Speech recognition capability.

use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    /// The user refused microphone access. Not retried automatically.
    #[error("microphone permission denied")]
    NotAllowed,
    /// `start` was called on an engine that is already listening.
    #[error("recognition already started")]
    AlreadyStarted,
    #[error("no speech detected")]
    NoSpeech,
    #[error("recognition engine error: {0}")]
    Engine(String),
}

/// Events pushed by a recognition engine.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    Started,
    Transcript { text: String, is_final: bool },
    /// The engine stopped on its own (silence, network, browser policy).
    Ended,
    Error(RecognitionError),
}

/// Continuous speech recognizer. Results arrive as [`RecognitionEvent`]s on
/// whatever channel the engine was built with.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn start(&self) -> Result<(), RecognitionError>;

    async fn stop(&self);

    fn provider_name(&self) -> &'static str;
}

/// Whether the host offers speech recognition at all.
#[derive(Clone)]
pub enum SpeechCapability {
    Available(Arc<dyn Recognizer>),
    Unavailable,
}

impl SpeechCapability {
    pub fn recognizer(&self) -> Option<&Arc<dyn Recognizer>> {
        match self {
            Self::Available(r) => Some(r),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl std::fmt::Debug for SpeechCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(r) => write!(f, "Available({})", r.provider_name()),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}
