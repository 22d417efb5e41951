pub mod clock;
pub mod config;
pub mod context;
pub mod emotion;
pub mod intent;
pub mod memory;
pub mod persona;
pub mod rng;
pub mod voice;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::NutriConfig;
pub use context::ConversationContext;
pub use emotion::{detect_emotion, Emotion};
pub use intent::{Intent, IntentKind};
pub use memory::{MemoryEntry, ShortTermMemory, MEMORY_CAPACITY};
pub use persona::Persona;
pub use rng::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};
pub use voice::{Gender, VoiceProfile};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message in the conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the conversation log. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Upper-case the first character and lower-case the rest.
///
/// Used for names captured from speech ("cArLa" -> "Carla").
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("carla"), "Carla");
        assert_eq!(capitalize("JOÃO"), "João");
        assert_eq!(capitalize("élio"), "Élio");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_message_constructors() {
        let m = Message::user("oi");
        assert_eq!(m.role, Role::User);
        assert_eq!(m.text, "oi");
        let a = Message::assistant("olá");
        assert_eq!(a.role, Role::Assistant);
        assert_ne!(m.id, a.id);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }
}
