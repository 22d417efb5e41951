//! Intent Classifier
//!
//! Rule-based: the utterance is tested against keyword groups in a fixed
//! priority order and the first group that matches wins. An utterance that
//! hits two groups ("oi, quero emagrecer") resolves to whichever group comes
//! first in [`GROUPS`].

use nutri_core::{capitalize, Intent, IntentKind};
use once_cell::sync::Lazy;
use regex::Regex;

const MIN_NAME_CHARS: usize = 2;
const MAX_NAME_CHARS: usize = 20;

/// "meu nome é Carla", "pode me chamar de Bia", "sou a Ana".
static INTRODUCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:meu nome é|me chamo|sou o|sou a|pode me chamar de|nome é)\s+(\w+)")
        .expect("introduction pattern")
});

/// Greeting and self-introduction filler stripped before taking a name.
/// Longer phrases come first so "eu sou a" is not cut at "eu sou".
static FILLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:meu nome é|pode me chamar de|me chamo|eu sou o|eu sou a|eu sou|sou o|sou a|oi|olá|ola|hey)\b",
    )
    .expect("filler pattern")
});

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.,!?;:]+").expect("punctuation pattern"));

/// Entries are regex fragments, so `dietas?` also matches the plural.
fn keywords(words: &[&str]) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|"))).expect("keyword pattern")
}

static GROUPS: Lazy<Vec<(IntentKind, Regex)>> = Lazy::new(|| {
    vec![
        (
            IntentKind::Greeting,
            keywords(&["oi", "olá", "ola", "e aí", "eai", "hello", "hi", "opa"]),
        ),
        (
            IntentKind::DateInfo,
            keywords(&["dia", "data", "hoje", "que dia"]),
        ),
        (
            IntentKind::WeightLoss,
            keywords(&["emagrecer", "perder peso", "secar", "dietas?", "emagrecimento"]),
        ),
        (
            IntentKind::MuscleGain,
            keywords(&["massa", "musculares", "muscular", "ganhar", "fortes?", "hipertrofia"]),
        ),
        (
            IntentKind::Energy,
            keywords(&["energia", "força", "cansad[oa]s?", "fadiga", "disposição"]),
        ),
        (
            IntentKind::MealSuggestion,
            keywords(&[
                "receitas?", "comer", "refeição", "refeições", "fome", "almoços?", "janta",
                "jantar", "lanches?", "ceia",
            ]),
        ),
        (
            IntentKind::Thanks,
            keywords(&["obrigad[oa]", "valeu", "agradeço"]),
        ),
    ]
});

/// A valid spoken name: letters only, 2 to 20 characters, normalized to
/// "Carla" form.
fn normalize_name(token: &str) -> Option<String> {
    let len = token.chars().count();
    let letters_only = token.chars().all(char::is_alphabetic);
    if letters_only && (MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&len) {
        Some(capitalize(token))
    } else {
        None
    }
}

/// The name given in an explicit introduction phrase, if any.
fn introduced_name(utterance: &str) -> Option<String> {
    INTRODUCTION
        .captures(utterance)
        .and_then(|caps| caps.get(1))
        .and_then(|m| normalize_name(m.as_str()))
}

/// Whether the utterance contains an explicit self-introduction with a valid
/// name. Only these may replace a name that was already captured.
pub fn introduces_name(utterance: &str) -> bool {
    introduced_name(utterance).is_some()
}

/// Map an utterance to its intent. Callers skip blank utterances.
pub fn classify(utterance: &str) -> Intent {
    let text = utterance.trim().to_lowercase();

    if let Some(name) = introduced_name(&text) {
        return Intent::set_name(name);
    }

    if let Some((kind, _)) = GROUPS.iter().find(|(_, re)| re.is_match(&text)) {
        return Intent::new(*kind);
    }

    let bare = PUNCTUATION.replace_all(&text, "");
    let mut tokens = bare.split_whitespace();
    if let (Some(token), None) = (tokens.next(), tokens.next()) {
        if let Some(name) = normalize_name(token) {
            return Intent::set_name(name);
        }
    }

    Intent::general()
}

/// Pull a name out of a free-form answer to "como você se chama?".
///
/// Filler phrases are removed and the first remaining word is taken, but only
/// if filler was actually present or the answer was a single word. "Quero
/// emagrecer" therefore yields no name.
pub fn extract_name(utterance: &str) -> Option<String> {
    let lower = utterance.trim().to_lowercase();
    let without_punct = PUNCTUATION.replace_all(&lower, " ");
    let stripped = FILLER.replace_all(&without_punct, " ");
    let had_filler = stripped != without_punct;

    let tokens: Vec<&str> = stripped.split_whitespace().collect();
    let first = tokens.first()?;
    if !had_filler && tokens.len() != 1 {
        return None;
    }
    normalize_name(first)
}
