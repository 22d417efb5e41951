//! Response Selector
//!
//! Picks one template from the pool the turn calls for and fills its slots.
//! The random draw and the clock are injected so tests can pin the exact
//! output.

use crate::locale::{format_long_date, period_of_day};
use crate::templates::{self, Pool};
use chrono::Timelike;
use nutri_core::{
    Clock, ConversationContext, Gender, Intent, IntentKind, Persona, RandomSource, ShortTermMemory,
};
use std::sync::Arc;

/// Which pool a reply was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Recall,
    Introduction,
    SameName,
    Retry,
    Activation,
    WelcomeBack,
    Greeting,
    DateInfo,
    WeightLoss,
    MuscleGain,
    Energy,
    Meal,
    Thanks,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub pool: PoolKind,
}

/// Everything the selector looks at for one user turn.
pub struct Turn<'a> {
    pub utterance: &'a str,
    pub intent: &'a Intent,
    pub context: &'a ConversationContext,
    pub memory: &'a ShortTermMemory,
    pub user_gender: Gender,
}

pub struct Responder {
    rng: Box<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    persona: Persona,
}

impl Responder {
    pub fn new(rng: Box<dyn RandomSource>, clock: Arc<dyn Clock>, persona: Persona) -> Self {
        Self {
            rng,
            clock,
            persona,
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn set_persona(&mut self, persona: Persona) {
        self.persona = persona;
    }

    pub fn respond(&mut self, turn: &Turn<'_>) -> Reply {
        let ctx = turn.context;

        if let Some(text) = turn
            .memory
            .recall(turn.utterance, ctx.last_meal.as_deref())
        {
            return Reply {
                text,
                pool: PoolKind::Recall,
            };
        }

        if !ctx.has_introduced {
            return match turn.intent.name() {
                Some(name) => self.introduction(name, turn.user_gender),
                None => self.retry(),
            };
        }

        if let Some(name) = turn.intent.name() {
            return self.introduction(name, turn.user_gender);
        }

        let speaker = ctx
            .user_name
            .as_deref()
            .or(self.persona.name.as_deref())
            .map(str::to_string);

        let (kind, pool) = match turn.intent.kind {
            IntentKind::Greeting => (PoolKind::Greeting, &templates::GREETING),
            IntentKind::DateInfo => (PoolKind::DateInfo, &templates::DATE_INFO),
            IntentKind::WeightLoss => (PoolKind::WeightLoss, &templates::WEIGHT_LOSS),
            IntentKind::MuscleGain => (PoolKind::MuscleGain, &templates::MUSCLE_GAIN),
            IntentKind::Energy => (PoolKind::Energy, &templates::ENERGY),
            IntentKind::MealSuggestion => (PoolKind::Meal, &templates::MEAL),
            IntentKind::Thanks => (PoolKind::Thanks, &templates::THANKS),
            IntentKind::SetName | IntentKind::General => (PoolKind::General, &templates::GENERAL),
        };

        self.draw(kind, pool, speaker.as_deref(), turn.user_gender)
    }

    /// Opening line when the session is switched on.
    pub fn activation_greeting(&mut self) -> Reply {
        let persona = self.persona.clone();
        self.draw(
            PoolKind::Activation,
            &templates::ACTIVATION,
            persona.name.as_deref(),
            persona.gender,
        )
    }

    /// Greeting for a user whose onboarding is already complete.
    pub fn welcome_back(&mut self, name: &str, gender: Gender) -> Reply {
        self.draw(
            PoolKind::WelcomeBack,
            &templates::WELCOME_BACK,
            Some(name),
            gender,
        )
    }

    /// Ask for the name again.
    pub fn retry(&mut self) -> Reply {
        self.draw(PoolKind::Retry, &templates::RETRY, None, Gender::default())
    }

    fn introduction(&mut self, name: &str, gender: Gender) -> Reply {
        if self.persona.shares_name_with(name) {
            self.draw(PoolKind::SameName, &templates::SAME_NAME, Some(name), gender)
        } else {
            self.draw(
                PoolKind::Introduction,
                &templates::INTRODUCTION,
                Some(name),
                gender,
            )
        }
    }

    fn draw(
        &mut self,
        kind: PoolKind,
        pool: &Pool,
        speaker: Option<&str>,
        user_gender: Gender,
    ) -> Reply {
        let variants = pool.variants(speaker.is_some());
        let template = variants[self.rng.pick(variants.len())];
        Reply {
            text: self.render(template, speaker, user_gender),
            pool: kind,
        }
    }

    fn render(&self, template: &str, speaker: Option<&str>, user_gender: Gender) -> String {
        let now = self.clock.now();
        let persona = self
            .persona
            .name
            .clone()
            .unwrap_or_else(|| "amigo".to_string());

        template
            .replace("{name}", speaker.unwrap_or("amigo"))
            .replace("{persona}", &persona)
            .replace("{period}", period_of_day(now.hour()))
            .replace("{date}", &format_long_date(now.date()))
            .replace("{possessive}", self.persona.gender.possessive())
            .replace("{article}", self.persona.gender.article())
            .replace("{ready}", user_gender.ready())
            .replace("{welcome}", user_gender.welcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use nutri_core::{Emotion, FixedClock, FixedRandom, MemoryEntry};

    fn clock() -> Arc<dyn Clock> {
        let at = NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap();
        Arc::new(FixedClock(at))
    }

    fn responder(index: usize, persona: Persona) -> Responder {
        Responder::new(Box::new(FixedRandom(index)), clock(), persona)
    }

    fn introduced(name: &str) -> ConversationContext {
        let mut ctx = ConversationContext::new();
        ctx.set_user_name(name);
        ctx
    }

    fn turn<'a>(
        utterance: &'a str,
        intent: &'a Intent,
        context: &'a ConversationContext,
        memory: &'a ShortTermMemory,
        user_gender: Gender,
    ) -> Turn<'a> {
        Turn {
            utterance,
            intent,
            context,
            memory,
            user_gender,
        }
    }

    #[test]
    fn test_retry_before_introduction() {
        let mut r = responder(0, Persona::from_display_name("Carla Souza"));
        let ctx = ConversationContext::new();
        let memory = ShortTermMemory::new();
        let intent = Intent::new(IntentKind::WeightLoss);

        let reply = r.respond(&turn("quero emagrecer", &intent, &ctx, &memory, Gender::Male));
        assert_eq!(reply.pool, PoolKind::Retry);
        assert_eq!(
            reply.text,
            "Desculpa Carla, não consegui pegar seu nome. Pode repetir pra mim?"
        );
    }

    #[test]
    fn test_retry_with_anonymous_persona() {
        let mut r = responder(0, Persona::anonymous());
        let reply = r.retry();
        assert!(reply.text.starts_with("Desculpa amigo,"));
    }

    #[test]
    fn test_introduction_pool() {
        let mut r = responder(0, Persona::from_display_name("Carla"));
        let ctx = ConversationContext::new();
        let memory = ShortTermMemory::new();
        let intent = Intent::set_name("Pedro");

        let reply = r.respond(&turn("Pedro", &intent, &ctx, &memory, Gender::Male));
        assert_eq!(reply.pool, PoolKind::Introduction);
        assert!(reply.text.starts_with("Prazer, Pedro!"));
    }

    #[test]
    fn test_same_name_pool_is_case_insensitive() {
        let mut r = responder(1, Persona::from_display_name("Carla"));
        let ctx = ConversationContext::new();
        let memory = ShortTermMemory::new();
        let intent = Intent::set_name("CARLA");

        let reply = r.respond(&turn("carla", &intent, &ctx, &memory, Gender::Female));
        assert_eq!(reply.pool, PoolKind::SameName);
        assert!(reply.text.contains("Somos xará, CARLA!"));
    }

    #[test]
    fn test_main_phase_uses_intent_pool_with_name() {
        let mut r = responder(0, Persona::anonymous());
        let ctx = introduced("Carla");
        let memory = ShortTermMemory::new();
        let intent = Intent::new(IntentKind::WeightLoss);

        let reply = r.respond(&turn("quero emagrecer", &intent, &ctx, &memory, Gender::Female));
        assert_eq!(reply.pool, PoolKind::WeightLoss);
        assert!(reply.text.starts_with("Entendi, Carla."));
    }

    #[test]
    fn test_greeting_uses_user_gender() {
        let mut r = responder(1, Persona::anonymous());
        let ctx = introduced("Carla");
        let memory = ShortTermMemory::new();
        let intent = Intent::new(IntentKind::Greeting);

        let reply = r.respond(&turn("oi", &intent, &ctx, &memory, Gender::Female));
        assert_eq!(reply.text, "Oi, Carla! Pronta para evoluir hoje?");

        let reply = r.respond(&turn("oi", &intent, &ctx, &memory, Gender::Male));
        assert_eq!(reply.text, "Oi, Carla! Pronto para evoluir hoje?");
    }

    #[test]
    fn test_greeting_period_from_clock() {
        let mut r = responder(3, Persona::anonymous());
        let ctx = introduced("Ana");
        let memory = ShortTermMemory::new();
        let intent = Intent::new(IntentKind::Greeting);

        let reply = r.respond(&turn("oi", &intent, &ctx, &memory, Gender::Female));
        assert_eq!(reply.text, "Boa noite, Ana! Como vai sua energia hoje?");
    }

    #[test]
    fn test_date_reply() {
        let mut r = responder(0, Persona::anonymous());
        let ctx = introduced("Ana");
        let memory = ShortTermMemory::new();
        let intent = Intent::new(IntentKind::DateInfo);

        let reply = r.respond(&turn("hoje", &intent, &ctx, &memory, Gender::Female));
        assert_eq!(
            reply.text,
            "Hoje é sábado, 17 de outubro de 2026, Ana! Dia perfeito para comer bem!"
        );
    }

    #[test]
    fn test_anonymous_variant_without_any_name() {
        let mut r = responder(0, Persona::anonymous());
        let ctx = ConversationContext {
            has_introduced: true,
            ..Default::default()
        };
        let memory = ShortTermMemory::new();
        let intent = Intent::general();

        let reply = r.respond(&turn("hmm", &intent, &ctx, &memory, Gender::Male));
        assert_eq!(reply.text, "Interessante! Como posso ajudar sua nutrição hoje?");
    }

    #[test]
    fn test_recall_short_circuits() {
        let mut r = responder(0, Persona::anonymous());
        let ctx = introduced("Ana");
        let mut memory = ShortTermMemory::new();
        memory.remember(MemoryEntry::new("quero emagrecer", "ok", "emagrecer", Emotion::Neutral));
        let intent = Intent::new(IntentKind::WeightLoss);

        let reply = r.respond(&turn(
            "lembra do que eu falei?",
            &intent,
            &ctx,
            &memory,
            Gender::Female,
        ));
        assert_eq!(reply.pool, PoolKind::Recall);
        assert_eq!(reply.text, "Lembro sim! Você comentou sobre emagrecer. Como foi?");
    }

    #[test]
    fn test_activation_uses_persona_gender() {
        let mut r = responder(0, Persona::from_display_name("Carla"));
        let reply = r.activation_greeting();
        assert_eq!(reply.pool, PoolKind::Activation);
        assert!(reply.text.starts_with("Oi, eu sou sua NutriAI, me chamo Carla"));

        let mut r = responder(0, Persona::anonymous());
        let reply = r.activation_greeting();
        assert!(reply.text.starts_with("Oi, eu sou seu NutriAI!"));
    }

    #[test]
    fn test_welcome_back() {
        let mut r = responder(0, Persona::anonymous());
        let reply = r.welcome_back("Fernanda", Gender::Female);
        assert_eq!(reply.text, "Bem-vinda de volta, Fernanda! Pronta para arrasar hoje?");
    }
}
