//! Session-scoped conversation context.

use crate::emotion::Emotion;
use crate::intent::Intent;
use serde::{Deserialize, Serialize};

/// Meal words remembered for "that lunch you mentioned" callbacks.
pub const MEAL_KEYWORDS: &[&str] = &["café", "almoço", "jantar", "lanche"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub user_name: Option<String>,
    pub last_topic: String,
    pub last_objective: String,
    pub last_meal: Option<String>,
    pub emotional_state: Emotion,
    pub has_introduced: bool,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the user's name and leave the name-capture phase for good.
    pub fn set_user_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if let Some(previous) = self.user_name.as_deref() {
            if previous != name {
                tracing::info!("User renamed from {} to {}", previous, name);
            }
        }
        self.user_name = Some(name);
        self.has_introduced = true;
    }

    /// Apply one classified turn: topic, objective, meal and emotion.
    pub fn update(&mut self, intent: &Intent, emotion: Emotion, utterance: &str) {
        if let Some(topic) = intent.kind.topic() {
            self.last_topic = topic.to_string();
        }
        if let Some(objective) = intent.kind.objective() {
            self.last_objective = objective.to_string();
        }
        if let Some(meal) = mentioned_meal(utterance) {
            self.last_meal = Some(meal.to_string());
        }
        self.emotional_state = emotion;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The first meal keyword (by position) in the utterance.
pub fn mentioned_meal(utterance: &str) -> Option<&'static str> {
    let lower = utterance.to_lowercase();
    MEAL_KEYWORDS
        .iter()
        .filter_map(|meal| lower.find(meal).map(|pos| (pos, *meal)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, meal)| meal)
}
