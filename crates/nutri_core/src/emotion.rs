//! Keyword-based emotion detection for Portuguese utterances.
//!
//! Families are tested in a fixed order (sad, happy, anxious, confused), so
//! "desanimado" lands on sad even though it contains "anim".

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Sad,
    Anxious,
    Confused,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Anxious => "anxious",
            Self::Confused => "confused",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const SAD: &[&str] = &["triste", "desanim", "cansad", "deprimi", "chate", "mal"];

const HAPPY: &[&str] = &[
    "felic", "anim", "empolgad", "otimo", "ótimo", "show", "massa", "legal",
];

const ANXIOUS: &[&str] = &["ansios", "preocup", "nervos", "stress", "estress"];

const CONFUSED: &[&str] = &["conf", "dúvid", "duvid", "não sei", "perdid"];

const FAMILIES: &[(&[&str], Emotion)] = &[
    (SAD, Emotion::Sad),
    (HAPPY, Emotion::Happy),
    (ANXIOUS, Emotion::Anxious),
    (CONFUSED, Emotion::Confused),
];

/// Map an utterance to the first emotion family it mentions.
pub fn detect_emotion(text: &str) -> Emotion {
    let lower = text.to_lowercase();
    FAMILIES
        .iter()
        .find(|(words, _)| words.iter().any(|w| lower.contains(w)))
        .map(|(_, emotion)| *emotion)
        .unwrap_or_default()
}
