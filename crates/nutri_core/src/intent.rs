use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a user utterance. The snake_case form is also the `intent`
/// string sent to the remote chat bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    SetName,
    Greeting,
    DateInfo,
    WeightLoss,
    MuscleGain,
    Energy,
    MealSuggestion,
    Thanks,
    General,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetName => "set_name",
            Self::Greeting => "greeting",
            Self::DateInfo => "date_info",
            Self::WeightLoss => "weight_loss",
            Self::MuscleGain => "muscle_gain",
            Self::Energy => "energy",
            Self::MealSuggestion => "meal_suggestion",
            Self::Thanks => "thanks",
            Self::General => "general",
        }
    }

    /// Topic label recorded in the conversation context, if the intent has one.
    pub fn topic(&self) -> Option<&'static str> {
        match self {
            Self::WeightLoss => Some("emagrecer"),
            Self::MuscleGain => Some("massa"),
            Self::Energy => Some("energia"),
            Self::MealSuggestion => Some("receita"),
            Self::DateInfo => Some("dia"),
            Self::Thanks => Some("agradecimento"),
            Self::SetName | Self::Greeting | Self::General => None,
        }
    }

    /// Long-lived objective implied by the intent.
    pub fn objective(&self) -> Option<&'static str> {
        match self {
            Self::WeightLoss => Some("emagrecimento"),
            Self::MuscleGain => Some("ganho de massa"),
            _ => None,
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying one utterance. `data` carries the captured name for
/// [`IntentKind::SetName`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub kind: IntentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Intent {
    pub fn new(kind: IntentKind) -> Self {
        Self { kind, data: None }
    }

    pub fn set_name(name: impl Into<String>) -> Self {
        Self {
            kind: IntentKind::SetName,
            data: Some(name.into()),
        }
    }

    pub fn general() -> Self {
        Self::new(IntentKind::General)
    }

    /// The captured name, when this is a name introduction.
    pub fn name(&self) -> Option<&str> {
        match self.kind {
            IntentKind::SetName => self.data.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(IntentKind::MealSuggestion.as_str(), "meal_suggestion");
        assert_eq!(
            serde_json::to_string(&IntentKind::WeightLoss).unwrap(),
            "\"weight_loss\""
        );
    }

    #[test]
    fn test_objectives() {
        assert_eq!(IntentKind::WeightLoss.objective(), Some("emagrecimento"));
        assert_eq!(IntentKind::MuscleGain.objective(), Some("ganho de massa"));
        assert_eq!(IntentKind::Energy.objective(), None);
    }

    #[test]
    fn test_name_accessor() {
        assert_eq!(Intent::set_name("Carla").name(), Some("Carla"));
        assert_eq!(Intent::general().name(), None);
    }
}
