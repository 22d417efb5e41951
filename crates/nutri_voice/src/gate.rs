//! Playback mutual exclusion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Admits at most one playback at a time. Callers that find the gate taken
/// are expected to drop their request rather than wait.
#[derive(Debug, Clone, Default)]
pub struct PlaybackGate {
    playing: Arc<AtomicBool>,
}

impl PlaybackGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the gate, or `None` if something is already playing.
    pub fn try_acquire(&self) -> Option<PlaybackGuard> {
        self.playing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PlaybackGuard {
                playing: self.playing.clone(),
            })
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }
}

/// Releases the gate on drop, including on error paths.
#[derive(Debug)]
pub struct PlaybackGuard {
    playing: Arc<AtomicBool>,
}

impl Drop for PlaybackGuard {
    fn drop(&mut self) {
        self.playing.store(false, Ordering::Release);
    }
}
