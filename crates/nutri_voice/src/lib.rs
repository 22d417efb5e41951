//! Speech I/O for NutriAI
//!
//! Wraps a speech recognizer and a speech synthesizer behind [`SpeechIo`],
//! which owns the microphone lifecycle and lets only one playback run at a
//! time. Concrete engines plug in through the [`Recognizer`] and
//! [`Synthesizer`] traits.

mod adapter;
mod capability;
mod gate;
pub mod prosody;
mod scheduler;
mod sink;
mod synth;

pub use adapter::{Notice, SpeakOutcome, SpeechIo, VoiceTiming};
pub use capability::{RecognitionError, RecognitionEvent, Recognizer, SpeechCapability};
pub use gate::{PlaybackGate, PlaybackGuard};
pub use scheduler::{Scheduler, TimerKey};
pub use sink::{AudioSink, FileSink};
pub use synth::{ConsoleSynthesizer, QuotaExceeded, SilentSynthesizer, Synthesizer};
