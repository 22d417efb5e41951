use crate::voice::Gender;
use serde::{Deserialize, Serialize};

/// Label used when the assistant has no displayed name.
pub const ANONYMOUS_LABEL: &str = "Amigo";

/// The assistant's displayed identity.
///
/// The name comes from the first token of the signed-in profile's display
/// name, so "Carla Souza" shows up as "NutriAI - Carla".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: Option<String>,
    pub gender: Gender,
}

impl Persona {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build from a full display name; blank names give an anonymous persona.
    pub fn from_display_name(full_name: &str) -> Self {
        match full_name.split_whitespace().next() {
            Some(first) => Self {
                name: Some(first.to_string()),
                gender: Gender::from_first_name(first),
            },
            None => Self::anonymous(),
        }
    }

    /// Name for display, falling back to "Amigo".
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(ANONYMOUS_LABEL)
    }

    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    /// Case-insensitive comparison against a captured user name.
    pub fn shares_name_with(&self, other: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.to_lowercase() == other.trim().to_lowercase())
    }
}
