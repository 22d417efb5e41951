//! Property-based tests for the classifier and the two-phase session.

use chrono::NaiveDate;
use nutri_core::{FixedClock, IntentKind, Persona, SeededRandom};
use nutri_dialogue::{classify, extract_name, Conversation, Responder};
use nutri_voice::{SilentSynthesizer, SpeechCapability, SpeechIo, VoiceTiming};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::sync::Arc;
use std::time::Duration;

fn is_valid_name(name: &str) -> bool {
    let len = name.chars().count();
    let mut chars = name.chars();
    let first_upper = chars.next().is_some_and(|c| !c.is_lowercase());
    (2..=20).contains(&len)
        && name.chars().all(char::is_alphabetic)
        && first_upper
        && chars.all(|c| !c.is_uppercase())
}

fn conversation(seed: u64) -> Conversation {
    let timing = VoiceTiming {
        resume_delay: Duration::from_millis(1),
        restart_delay: Duration::from_millis(1),
        listen_start_delay: Duration::from_millis(1),
        lead_in: Duration::ZERO,
    };
    let (speech, _notices) = SpeechIo::new(
        SpeechCapability::Unavailable,
        Arc::new(SilentSynthesizer),
        timing,
    );
    let at = NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap();
    let responder = Responder::new(
        Box::new(SeededRandom::new(seed)),
        Arc::new(FixedClock(at)),
        Persona::anonymous(),
    );
    Conversation::new(speech, responder, None)
}

proptest! {
    /// Any captured name is letters only, 2 to 20 long, and capitalized.
    #[test]
    fn captured_names_are_normalized(text in "[a-zA-ZáéíóúãõçÁÉÍÓÚÃÕÇ0-9 ,.!?]{0,40}") {
        let intent = classify(&text);
        if intent.kind == IntentKind::SetName {
            let name = intent.data.unwrap();
            prop_assert!(is_valid_name(&name), "bad name {:?}", name);
        } else {
            prop_assert!(intent.data.is_none());
        }
        if let Some(name) = extract_name(&text) {
            prop_assert!(is_valid_name(&name), "bad name {:?}", name);
        }
    }

    /// A single word of letters is either a keyword or a name.
    #[test]
    fn bare_word_is_never_general(word in "[a-z]{2,20}") {
        prop_assert_ne!(classify(&word).kind, IntentKind::General);
    }

    /// Once a name is captured the session stays in the main phase and
    /// every turn gets a non-empty reply.
    #[test]
    fn main_phase_is_permanent(
        seed in any::<u64>(),
        turns in prop::collection::vec("[a-záéíóúãõç ,!?]{0,30}", 1..12),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        rt.block_on(async {
            let mut convo = conversation(seed);
            convo.handle_utterance("meu nome é Carla").await.unwrap();
            for text in &turns {
                if let Some(exchange) = convo.handle_utterance(text).await {
                    prop_assert!(!exchange.reply.trim().is_empty());
                }
                prop_assert!(convo.context().has_introduced);
                prop_assert!(convo.context().user_name.is_some());
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
