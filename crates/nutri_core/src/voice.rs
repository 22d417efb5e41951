//! Voice parameters and the first-name gender table.

use crate::emotion::Emotion;
use serde::{Deserialize, Serialize};
use std::fmt;

const MALE_NAMES: &[&str] = &[
    "carlos", "joão", "pedro", "marcos", "lucas", "josiel", "miguel", "rafael", "fernando",
    "ricardo", "rodrigo", "paulo", "bruno", "andré", "felipe",
];

const FEMALE_NAMES: &[&str] = &[
    "ana", "maria", "julia", "carla", "patricia", "fernanda", "beatriz", "amanda", "juliana",
    "carolina", "gabriela", "camila", "leticia", "mariana", "paula",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Look a first name up in the static tables; unknown names are male.
    pub fn from_first_name(name: &str) -> Self {
        let clean = name.trim().to_lowercase();
        if FEMALE_NAMES.contains(&clean.as_str()) {
            Self::Female
        } else {
            if !MALE_NAMES.contains(&clean.as_str()) {
                tracing::debug!("No gender entry for {:?}, defaulting to male", clean);
            }
            Self::Male
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// "seu" / "sua"
    pub fn possessive(&self) -> &'static str {
        match self {
            Self::Male => "seu",
            Self::Female => "sua",
        }
    }

    /// "o" / "a"
    pub fn article(&self) -> &'static str {
        match self {
            Self::Male => "o",
            Self::Female => "a",
        }
    }

    /// "Pronto" / "Pronta"
    pub fn ready(&self) -> &'static str {
        match self {
            Self::Male => "Pronto",
            Self::Female => "Pronta",
        }
    }

    /// "Bem-vindo" / "Bem-vinda"
    pub fn welcome(&self) -> &'static str {
        match self {
            Self::Male => "Bem-vindo",
            Self::Female => "Bem-vinda",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub gender: Gender,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl VoiceProfile {
    pub fn for_gender(gender: Gender) -> Self {
        let pitch = match gender {
            Gender::Male => 0.88,
            Gender::Female => 1.12,
        };
        Self {
            gender,
            rate: 0.9,
            pitch,
            volume: 1.0,
        }
    }

    /// Slow down for sad or anxious listeners, speed up for happy ones.
    pub fn with_emotion(mut self, emotion: Emotion) -> Self {
        match emotion {
            Emotion::Sad => self.rate = 0.85,
            Emotion::Happy => self.rate = 0.95,
            Emotion::Anxious => self.rate = 0.88,
            Emotion::Neutral | Emotion::Confused => {}
        }
        self
    }
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self::for_gender(Gender::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(Gender::from_first_name("carla"), Gender::Female);
        assert_eq!(Gender::from_first_name(" Carla "), Gender::Female);
        assert_eq!(Gender::from_first_name("João"), Gender::Male);
        assert_eq!(Gender::from_first_name("Zuleica"), Gender::Male);
    }

    #[test]
    fn test_profile_pitch_by_gender() {
        assert!((VoiceProfile::for_gender(Gender::Male).pitch - 0.88).abs() < 1e-6);
        assert!((VoiceProfile::for_gender(Gender::Female).pitch - 1.12).abs() < 1e-6);
    }

    #[test]
    fn test_emotion_rate_deltas() {
        let base = VoiceProfile::for_gender(Gender::Female);
        assert!((base.rate - 0.9).abs() < 1e-6);
        assert!((base.with_emotion(Emotion::Sad).rate - 0.85).abs() < 1e-6);
        assert!((base.with_emotion(Emotion::Happy).rate - 0.95).abs() < 1e-6);
        assert!((base.with_emotion(Emotion::Anxious).rate - 0.88).abs() < 1e-6);
        assert!((base.with_emotion(Emotion::Confused).rate - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_phrasing() {
        assert_eq!(Gender::Female.ready(), "Pronta");
        assert_eq!(Gender::Male.welcome(), "Bem-vindo");
        assert_eq!(Gender::Female.possessive(), "sua");
    }
}
