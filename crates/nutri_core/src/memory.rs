//! Short-term conversational memory.
//!
//! Holds the last few exchanges so the assistant can answer "lembra do que eu
//! falei?" with a shallow callback. Oldest entries are evicted first.

use crate::emotion::Emotion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const MEMORY_CAPACITY: usize = 5;

/// Words that point back to something said earlier.
const BACK_REFERENCES: &[&str] = &["lembra", "falei", "disse", "comentei", "ontem", "antes"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub user_message: String,
    pub ai_response: String,
    pub topic: String,
    pub emotion: Emotion,
    pub timestamp: DateTime<Utc>,
}

impl MemoryEntry {
    pub fn new(
        user_message: impl Into<String>,
        ai_response: impl Into<String>,
        topic: impl Into<String>,
        emotion: Emotion,
    ) -> Self {
        Self {
            user_message: user_message.into(),
            ai_response: ai_response.into(),
            topic: topic.into(),
            emotion,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShortTermMemory {
    entries: VecDeque<MemoryEntry>,
}

impl ShortTermMemory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MEMORY_CAPACITY),
        }
    }

    /// Append an exchange, dropping the oldest when full.
    pub fn remember(&mut self, entry: MemoryEntry) {
        if self.entries.len() == MEMORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// A callback sentence when the utterance refers back to the conversation.
    ///
    /// Back-references ("lembra", "ontem", ...) recall the latest exchange's
    /// topic; otherwise a mention of `last_meal` recalls that meal.
    pub fn recall(&self, utterance: &str, last_meal: Option<&str>) -> Option<String> {
        let lower = utterance.to_lowercase();

        if BACK_REFERENCES.iter().any(|w| lower.contains(w)) {
            if let Some(latest) = self.latest() {
                let topic = if latest.topic.is_empty() {
                    "isso"
                } else {
                    latest.topic.as_str()
                };
                return Some(format!("Lembro sim! Você comentou sobre {}. Como foi?", topic));
            }
        }

        if let Some(meal) = last_meal.filter(|m| !m.is_empty()) {
            if lower.contains(&meal.to_lowercase()) {
                return Some(format!(
                    "Ah, você tá falando daquele {} que comentou? Quer ajustar algo nele?",
                    meal
                ));
            }
        }

        None
    }

    pub fn latest(&self) -> Option<&MemoryEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
