//! Speech synthesis trait definition

use anyhow::Result;
use async_trait::async_trait;
use nutri_core::{Gender, VoiceProfile};
use std::io::Write;
use thiserror::Error;

/// Raised by engines whose backend refuses service for usage limits, so the
/// user can be told to retry later rather than that speech broke.
#[derive(Debug, Clone, Copy, Error)]
#[error("Voice API usage limit reached")]
pub struct QuotaExceeded;

/// Text-to-speech engine.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Render `text` with the given voice and wait until playback ends.
    ///
    /// An error means nothing (or only part) was heard.
    async fn speak(&self, text: &str, voice: &VoiceProfile) -> Result<()>;

    fn provider_name(&self) -> &'static str;
}

/// Used when the host has no synthesis engine; every call succeeds silently.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSynthesizer;

#[async_trait]
impl Synthesizer for SilentSynthesizer {
    async fn speak(&self, _text: &str, _voice: &VoiceProfile) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "silent"
    }
}

/// Prints what would be spoken, tagged with the voice in use.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSynthesizer;

#[async_trait]
impl Synthesizer for ConsoleSynthesizer {
    async fn speak(&self, text: &str, voice: &VoiceProfile) -> Result<()> {
        let label = match voice.gender {
            Gender::Male => "voz masculina",
            Gender::Female => "voz feminina",
        };
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "🔊 [{} {:.2}x] {}", label, voice.rate, text)?;
        stdout.flush()?;
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "console"
    }
}
