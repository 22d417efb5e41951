//! Delayed callbacks with cancellation handles.
//!
//! Each timer lives in a named slot. Scheduling into an occupied slot aborts
//! the previous timer, which is how restarts are debounced.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// First listen after the welcome line.
    ListenStart,
    /// Recognizer stopped on its own and should come back.
    Restart,
    /// Playback finished; reopen the microphone.
    Resume,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    timers: Mutex<HashMap<TimerKey, JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay`, replacing any timer pending under `key`.
    pub fn schedule<F>(&self, key: TimerKey, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        let mut timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = timers.insert(key, handle) {
            if !previous.is_finished() {
                tracing::debug!("Timer {:?} rescheduled", key);
            }
            previous.abort();
        }
    }

    pub fn cancel(&self, key: TimerKey) {
        let mut timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = timers.remove(&key) {
            handle.abort();
        }
    }

    pub fn cancel_all(&self) {
        let mut timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
        for (_, handle) in timers.drain() {
            handle.abort();
        }
    }

    /// Whether a timer under `key` has been scheduled and has not fired yet.
    pub fn is_pending(&self, key: TimerKey) -> bool {
        let timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
        timers.get(&key).is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        let timers = self.timers.get_mut().unwrap_or_else(|e| e.into_inner());
        for (_, handle) in timers.drain() {
            handle.abort();
        }
    }
}
