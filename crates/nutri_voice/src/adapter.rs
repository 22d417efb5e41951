use crate::capability::{RecognitionError, RecognitionEvent, Recognizer, SpeechCapability};
use crate::gate::PlaybackGate;
use crate::prosody;
use crate::scheduler::{Scheduler, TimerKey};
use crate::synth::{QuotaExceeded, Synthesizer};
use nutri_core::config::VoiceTimingConfig;
use nutri_core::VoiceProfile;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// User-visible notices raised by the speech layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    MicrophoneDenied,
    SpeechFailed,
    /// The voice backend refused the request for usage limits.
    VoiceQuota,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MicrophoneDenied => {
                "Permissão de microfone negada. Ative o microfone para conversar com o NutriAI."
            }
            Self::SpeechFailed => "Erro ao gerar voz. Tente novamente.",
            Self::VoiceQuota => {
                "Limite de uso da API de voz atingido. Tente novamente mais tarde."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    Played,
    /// Another playback was in flight, or there was nothing to say.
    Dropped,
    /// The session was deactivated mid-playback.
    Cancelled,
    Failed,
}

#[derive(Debug, Clone, Copy)]
pub struct VoiceTiming {
    pub resume_delay: Duration,
    pub restart_delay: Duration,
    pub listen_start_delay: Duration,
    pub lead_in: Duration,
}

impl From<&VoiceTimingConfig> for VoiceTiming {
    fn from(cfg: &VoiceTimingConfig) -> Self {
        Self {
            resume_delay: Duration::from_millis(cfg.resume_delay_ms),
            restart_delay: Duration::from_millis(cfg.restart_delay_ms),
            listen_start_delay: Duration::from_millis(cfg.listen_start_delay_ms),
            lead_in: Duration::from_millis(cfg.lead_in_ms),
        }
    }
}

impl Default for VoiceTiming {
    fn default() -> Self {
        Self::from(&VoiceTimingConfig::default())
    }
}

struct Shared {
    capability: SpeechCapability,
    synthesizer: Arc<dyn Synthesizer>,
    gate: PlaybackGate,
    active: AtomicBool,
    mic_denied: AtomicBool,
    notices: mpsc::UnboundedSender<Notice>,
    /// Bumped on deactivation; in-flight playback watches it.
    halt: watch::Sender<u64>,
    timing: VoiceTiming,
}

impl Shared {
    fn may_listen(&self) -> bool {
        self.active.load(Ordering::Acquire)
            && !self.gate.is_playing()
            && !self.mic_denied.load(Ordering::Acquire)
    }

    fn notify(&self, notice: Notice) {
        if self.notices.send(notice).is_err() {
            tracing::debug!("Notice {:?} dropped, no listener", notice);
        }
    }

    fn on_recognition_error(&self, err: &RecognitionError) {
        match err {
            RecognitionError::NotAllowed => {
                // only the first denial is surfaced
                if !self.mic_denied.swap(true, Ordering::AcqRel) {
                    tracing::warn!("Microphone permission denied");
                    self.notify(Notice::MicrophoneDenied);
                }
            }
            RecognitionError::AlreadyStarted => {
                tracing::debug!("Recognition already active");
            }
            other => tracing::warn!("Recognition error: {}", other),
        }
    }

    async fn start_recognizer(&self) {
        let Some(recognizer) = self.capability.recognizer() else {
            return;
        };
        if !self.may_listen() {
            return;
        }
        match recognizer.start().await {
            Ok(()) => tracing::debug!("Microphone open ({})", recognizer.provider_name()),
            Err(e) => self.on_recognition_error(&e),
        }
    }
}

/// The speech boundary of a session: microphone lifecycle plus one-at-a-time
/// playback. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SpeechIo {
    shared: Arc<Shared>,
    scheduler: Arc<Scheduler>,
}

impl SpeechIo {
    /// Build the adapter and the receiver on which user notices arrive.
    pub fn new(
        capability: SpeechCapability,
        synthesizer: Arc<dyn Synthesizer>,
        timing: VoiceTiming,
    ) -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (notices, rx) = mpsc::unbounded_channel();
        let (halt, _) = watch::channel(0);
        tracing::info!(
            "Speech I/O: recognition {:?}, synthesis via {}",
            capability,
            synthesizer.provider_name()
        );
        let io = Self {
            shared: Arc::new(Shared {
                capability,
                synthesizer,
                gate: PlaybackGate::new(),
                active: AtomicBool::new(false),
                mic_denied: AtomicBool::new(false),
                notices,
                halt,
                timing,
            }),
            scheduler: Arc::new(Scheduler::new()),
        };
        (io, rx)
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    pub fn is_speaking(&self) -> bool {
        self.shared.gate.is_playing()
    }

    pub fn microphone_denied(&self) -> bool {
        self.shared.mic_denied.load(Ordering::Acquire)
    }

    pub fn timing(&self) -> VoiceTiming {
        self.shared.timing
    }

    pub fn activate(&self) {
        self.shared.mic_denied.store(false, Ordering::Release);
        self.shared.active.store(true, Ordering::Release);
    }

    /// Stop listening, cancel playback and every pending timer.
    pub async fn deactivate(&self) {
        self.shared.active.store(false, Ordering::Release);
        self.scheduler.cancel_all();
        if let Some(recognizer) = self.shared.capability.recognizer() {
            recognizer.stop().await;
        }
        self.shared.halt.send_modify(|epoch| *epoch = epoch.wrapping_add(1));
        tracing::info!("Speech I/O deactivated");
    }

    /// Open the microphone after `delay`.
    pub fn listen_after(&self, delay: Duration) {
        self.schedule_listen(TimerKey::ListenStart, delay);
    }

    fn schedule_listen(&self, key: TimerKey, delay: Duration) {
        if !self.shared.capability.is_available() {
            return;
        }
        let shared = self.shared.clone();
        self.scheduler.schedule(key, delay, async move {
            shared.start_recognizer().await;
        });
    }

    /// Route one recognition event; returns a finalized transcript if any.
    pub fn handle_event(&self, event: RecognitionEvent) -> Option<String> {
        match event {
            RecognitionEvent::Started => {
                tracing::debug!("Recognition started");
                None
            }
            RecognitionEvent::Transcript { .. } if !self.is_active() => {
                tracing::debug!("Transcript after deactivation ignored");
                None
            }
            RecognitionEvent::Transcript { text, is_final } => {
                let text = text.trim();
                if is_final && !text.is_empty() {
                    tracing::info!("User said: {}", text);
                    Some(text.to_string())
                } else {
                    None
                }
            }
            RecognitionEvent::Ended => {
                if self.shared.may_listen() {
                    self.schedule_listen(TimerKey::Restart, self.shared.timing.restart_delay);
                }
                None
            }
            RecognitionEvent::Error(e) => {
                self.shared.on_recognition_error(&e);
                None
            }
        }
    }

    /// Speak `text`, pausing the microphone for the duration.
    ///
    /// Returns [`SpeakOutcome::Dropped`] without side effects when another
    /// playback is already running, and [`SpeakOutcome::Cancelled`] when
    /// [`SpeechIo::deactivate`] interrupts it.
    pub async fn speak(&self, text: &str, voice: &VoiceProfile) -> SpeakOutcome {
        if text.trim().is_empty() {
            return SpeakOutcome::Dropped;
        }
        let Some(guard) = self.shared.gate.try_acquire() else {
            tracing::debug!("Playback in flight, dropping speak request");
            return SpeakOutcome::Dropped;
        };
        let mut halted = self.shared.halt.subscribe();

        self.scheduler.cancel(TimerKey::Restart);
        self.scheduler.cancel(TimerKey::Resume);
        if let Some(recognizer) = self.shared.capability.recognizer() {
            recognizer.stop().await;
        }

        let natural = prosody::naturalize(text);
        let lead_in = self.shared.timing.lead_in;
        let playback = async {
            if !lead_in.is_zero() {
                tokio::time::sleep(lead_in).await;
            }
            self.shared.synthesizer.speak(&natural, voice).await
        };

        let result = tokio::select! {
            result = playback => result,
            _ = halted.changed() => {
                drop(guard);
                tracing::info!("Playback cancelled by deactivation");
                return SpeakOutcome::Cancelled;
            }
        };
        drop(guard);

        let outcome = match result {
            Ok(()) => SpeakOutcome::Played,
            Err(e) => {
                tracing::error!("Speech failed ({}): {:#}", self.shared.synthesizer.provider_name(), e);
                if e.downcast_ref::<QuotaExceeded>().is_some() {
                    self.shared.notify(Notice::VoiceQuota);
                } else {
                    self.shared.notify(Notice::SpeechFailed);
                }
                SpeakOutcome::Failed
            }
        };

        if self.is_active() {
            self.schedule_listen(TimerKey::Resume, self.shared.timing.resume_delay);
        }
        outcome
    }
}
