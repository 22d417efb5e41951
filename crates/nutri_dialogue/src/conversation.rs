//! Conversation session controller.
//!
//! One [`Conversation`] is one logical session. It moves through two phases:
//! name capture, then the main chat. The move happens the first time a name
//! is captured and never reverses until the session is deactivated.

use crate::classifier::{classify, extract_name, introduces_name};
use crate::responder::{Responder, Turn};
use nutri_bridge::{ChatBridge, ChatRequest, ResolvedProfile};
use nutri_core::{
    detect_emotion, ConversationContext, Emotion, Gender, Intent, IntentKind, MemoryEntry,
    Message, Persona, ShortTermMemory, VoiceProfile,
};
use nutri_voice::{RecognitionEvent, SpeakOutcome, SpeechIo};
use std::sync::Arc;

/// Said when the remote chat bridge fails.
pub const APOLOGY: &str = "Desculpe, tive um problema. Pode repetir?";

/// The outcome of one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub intent: Intent,
    pub emotion: Emotion,
    pub reply: String,
    pub spoken: SpeakOutcome,
}

pub struct Conversation {
    speech: SpeechIo,
    responder: Responder,
    chat: Option<Arc<dyn ChatBridge>>,
    context: ConversationContext,
    memory: ShortTermMemory,
    log: Vec<Message>,
    user_gender: Gender,
}

impl Conversation {
    /// `chat` switches replies to the remote bridge; `None` keeps the local
    /// template pools.
    pub fn new(speech: SpeechIo, responder: Responder, chat: Option<Arc<dyn ChatBridge>>) -> Self {
        let user_gender = responder.persona().gender;
        Self {
            speech,
            responder,
            chat,
            context: ConversationContext::new(),
            memory: ShortTermMemory::new(),
            log: Vec::new(),
            user_gender,
        }
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn memory(&self) -> &ShortTermMemory {
        &self.memory
    }

    pub fn messages(&self) -> &[Message] {
        &self.log
    }

    pub fn user_gender(&self) -> Gender {
        self.user_gender
    }

    pub fn persona(&self) -> &Persona {
        self.responder.persona()
    }

    pub fn speech(&self) -> &SpeechIo {
        &self.speech
    }

    pub fn is_active(&self) -> bool {
        self.speech.is_active()
    }

    pub fn uses_remote_chat(&self) -> bool {
        self.chat.is_some()
    }

    /// Switch the session on: greet, then open the microphone after the
    /// configured delay. Returns the greeting, or `None` when a returning
    /// user was already welcomed and no name needs asking for.
    pub async fn activate(&mut self) -> Option<String> {
        self.speech.activate();
        tracing::info!("Session activated as {}", self.responder.persona().label());

        let greeting = if self.context.has_introduced {
            None
        } else {
            let greeting = self.responder.activation_greeting().text;
            self.say(&greeting, Emotion::Neutral).await;
            Some(greeting)
        };
        self.speech
            .listen_after(self.speech.timing().listen_start_delay);
        greeting
    }

    /// Switch the session off and forget everything said in it.
    pub async fn deactivate(&mut self) {
        self.speech.deactivate().await;
        self.context.reset();
        self.memory.clear();
        self.log.clear();
        self.user_gender = self.responder.persona().gender;
        tracing::info!("Session deactivated");
    }

    /// Greet a user whose onboarding is already complete and start the
    /// session in the main phase under their known name. Returns `None` when
    /// the profile does not qualify.
    pub async fn greet_returning_user(&mut self, profile: &ResolvedProfile) -> Option<String> {
        if !profile.onboarding_completed {
            return None;
        }
        let name = profile.first_name()?.to_string();
        let greeting = self.responder.welcome_back(&name, profile.gender).text;
        self.context.set_user_name(&name);
        self.user_gender = profile.gender;
        self.log.push(Message::assistant(&greeting));
        self.say(&greeting, Emotion::Neutral).await;
        Some(greeting)
    }

    /// Feed a recognition event; a final transcript is handled as a turn.
    /// Transcripts that arrive once the session is off are discarded.
    pub async fn on_recognition_event(&mut self, event: RecognitionEvent) -> Option<Exchange> {
        let transcript = self.speech.handle_event(event)?;
        if !self.is_active() {
            return None;
        }
        self.handle_utterance(&transcript).await
    }

    /// Run one user turn: classify, reply, update state and speak.
    /// Blank input is ignored.
    pub async fn handle_utterance(&mut self, raw: &str) -> Option<Exchange> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        self.log.push(Message::user(text));

        let intent = self.interpret(text);
        let emotion = detect_emotion(text);
        tracing::debug!("Intent {} / emotion {}", intent.kind, emotion);

        let reply = match self.chat.clone() {
            Some(chat) => self.remote_reply(chat.as_ref(), &intent).await,
            None => self.local_reply(text, &intent),
        };

        self.apply_turn(text, &intent, emotion, &reply);
        let spoken = self.say(&reply, emotion).await;

        Some(Exchange {
            intent,
            emotion,
            reply,
            spoken,
        })
    }

    /// Classify with the phase in mind. Before a name is known, free-form
    /// answers are mined for a name; afterwards only explicit introductions
    /// may rename the user.
    fn interpret(&self, text: &str) -> Intent {
        let intent = classify(text);
        if !self.context.has_introduced {
            if intent.kind == IntentKind::SetName {
                return intent;
            }
            return extract_name(text).map(Intent::set_name).unwrap_or(intent);
        }
        if intent.kind == IntentKind::SetName && !introduces_name(text) {
            return Intent::general();
        }
        intent
    }

    fn local_reply(&mut self, text: &str, intent: &Intent) -> String {
        let user_gender = intent
            .name()
            .map(Gender::from_first_name)
            .unwrap_or(self.user_gender);
        let turn = Turn {
            utterance: text,
            intent,
            context: &self.context,
            memory: &self.memory,
            user_gender,
        };
        let reply = self.responder.respond(&turn);
        tracing::debug!("Reply drawn from {:?} pool", reply.pool);
        reply.text
    }

    async fn remote_reply(&self, chat: &dyn ChatBridge, intent: &Intent) -> String {
        let name = intent.name().or(self.context.user_name.as_deref());
        let request = ChatRequest::new(&self.log, name, intent.kind);
        match chat.reply(&request).await {
            Ok(message) if !message.trim().is_empty() => message,
            Ok(_) => {
                tracing::warn!("Remote chat returned an empty message");
                APOLOGY.to_string()
            }
            Err(e) => {
                tracing::error!("Remote chat failed: {:#}", e);
                APOLOGY.to_string()
            }
        }
    }

    fn apply_turn(&mut self, text: &str, intent: &Intent, emotion: Emotion, reply: &str) {
        let main_phase = self.context.has_introduced;

        if let Some(name) = intent.name() {
            self.user_gender = Gender::from_first_name(name);
            self.context.set_user_name(name);
            tracing::info!("User name captured: {} ({})", name, self.user_gender);
        }

        if main_phase {
            self.context.update(intent, emotion, text);
            self.memory.remember(MemoryEntry::new(
                text,
                reply,
                self.context.last_topic.clone(),
                emotion,
            ));
        }

        self.log.push(Message::assistant(reply));
    }

    async fn say(&self, text: &str, emotion: Emotion) -> SpeakOutcome {
        let voice = VoiceProfile::for_gender(self.user_gender).with_emotion(emotion);
        self.speech.speak(text, &voice).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::Responder;
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use nutri_core::{FixedClock, FixedRandom, Role};
    use nutri_voice::{SilentSynthesizer, SpeechCapability, Synthesizer, VoiceTiming};
    use std::sync::Mutex;
    use std::time::Duration;

    fn timing() -> VoiceTiming {
        VoiceTiming {
            resume_delay: Duration::from_millis(5),
            restart_delay: Duration::from_millis(5),
            listen_start_delay: Duration::from_millis(5),
            lead_in: Duration::ZERO,
        }
    }

    fn responder(persona: Persona) -> Responder {
        let at = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Responder::new(Box::new(FixedRandom(0)), Arc::new(FixedClock(at)), persona)
    }

    fn conversation_with(
        synth: Arc<dyn Synthesizer>,
        chat: Option<Arc<dyn ChatBridge>>,
    ) -> Conversation {
        let (speech, _notices) = SpeechIo::new(SpeechCapability::Unavailable, synth, timing());
        Conversation::new(speech, responder(Persona::anonymous()), chat)
    }

    fn conversation() -> Conversation {
        conversation_with(Arc::new(SilentSynthesizer), None)
    }

    /// Records the voice of every spoken line.
    #[derive(Default)]
    struct RecordingSynth {
        spoken: Mutex<Vec<(String, VoiceProfile)>>,
    }

    #[async_trait]
    impl Synthesizer for RecordingSynth {
        async fn speak(&self, text: &str, voice: &VoiceProfile) -> Result<()> {
            self.spoken.lock().unwrap().push((text.to_string(), *voice));
            Ok(())
        }

        fn provider_name(&self) -> &'static str {
            "recording"
        }
    }

    struct FixedChat(&'static str);

    #[async_trait]
    impl ChatBridge for FixedChat {
        async fn reply(&self, _request: &ChatRequest) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingChat;

    #[async_trait]
    impl ChatBridge for FailingChat {
        async fn reply(&self, _request: &ChatRequest) -> Result<String> {
            anyhow::bail!("Chat endpoint error (500 Internal Server Error)")
        }
    }

    /// Captures requests so tests can check what was sent.
    #[derive(Default)]
    struct CapturingChat {
        requests: Mutex<Vec<ChatRequest>>,
    }

    #[async_trait]
    impl ChatBridge for CapturingChat {
        async fn reply(&self, request: &ChatRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request.clone());
            Ok("Certo!".to_string())
        }
    }

    #[tokio::test]
    async fn test_name_capture_moves_to_main_phase() {
        let mut convo = conversation();
        let exchange = convo.handle_utterance("meu nome é Carla").await.unwrap();

        assert_eq!(exchange.intent, Intent::set_name("Carla"));
        assert!(exchange.reply.starts_with("Prazer, Carla!"));
        assert!(convo.context().has_introduced);
        assert_eq!(convo.context().user_name.as_deref(), Some("Carla"));
        assert_eq!(convo.user_gender(), Gender::Female);
        // name capture is not a remembered exchange
        assert!(convo.memory().is_empty());
    }

    #[tokio::test]
    async fn test_free_form_name_in_start_phase() {
        let mut convo = conversation();
        let exchange = convo.handle_utterance("oi, eu sou o João").await.unwrap();
        assert_eq!(exchange.intent.name(), Some("João"));
        assert_eq!(convo.user_gender(), Gender::Male);
    }

    #[tokio::test]
    async fn test_retry_until_name_given() {
        let mut convo = conversation();
        let exchange = convo.handle_utterance("quero emagrecer").await.unwrap();

        assert_eq!(exchange.intent.kind, IntentKind::WeightLoss);
        assert!(exchange.reply.starts_with("Desculpa amigo"));
        assert!(!convo.context().has_introduced);
        assert_eq!(convo.context().last_topic, "");
    }

    #[tokio::test]
    async fn test_main_phase_updates_context_and_memory() {
        let mut convo = conversation();
        convo.handle_utterance("Carla").await.unwrap();
        let exchange = convo.handle_utterance("quero emagrecer").await.unwrap();

        assert_eq!(exchange.intent.kind, IntentKind::WeightLoss);
        assert!(exchange.reply.contains("Carla"));
        assert_eq!(convo.context().last_topic, "emagrecer");
        assert_eq!(convo.context().last_objective, "emagrecimento");
        assert_eq!(convo.memory().len(), 1);
        assert_eq!(convo.messages().len(), 4);
    }

    #[tokio::test]
    async fn test_bare_word_does_not_rename_in_main_phase() {
        let mut convo = conversation();
        convo.handle_utterance("Carla").await.unwrap();
        let exchange = convo.handle_utterance("beleza").await.unwrap();

        assert_eq!(exchange.intent.kind, IntentKind::General);
        assert_eq!(convo.context().user_name.as_deref(), Some("Carla"));
    }

    #[tokio::test]
    async fn test_explicit_introduction_renames() {
        let mut convo = conversation();
        convo.handle_utterance("Carla").await.unwrap();
        convo.handle_utterance("na verdade meu nome é Pedro").await.unwrap();

        assert_eq!(convo.context().user_name.as_deref(), Some("Pedro"));
        assert_eq!(convo.user_gender(), Gender::Male);
    }

    #[tokio::test]
    async fn test_date_reply_uses_clock() {
        let mut convo = conversation();
        convo.handle_utterance("Ana").await.unwrap();
        let exchange = convo.handle_utterance("que dia é hoje?").await.unwrap();
        assert!(exchange.reply.contains("domingo, 18 de outubro de 2026"));
    }

    #[tokio::test]
    async fn test_recall_after_back_reference() {
        let mut convo = conversation();
        convo.handle_utterance("Ana").await.unwrap();
        convo.handle_utterance("quero ganhar massa").await.unwrap();
        let exchange = convo.handle_utterance("lembra do que eu falei?").await.unwrap();
        assert_eq!(exchange.reply, "Lembro sim! Você comentou sobre massa. Como foi?");
    }

    #[tokio::test]
    async fn test_blank_input_ignored() {
        let mut convo = conversation();
        assert!(convo.handle_utterance("   ").await.is_none());
        assert!(convo.messages().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_apologizes() {
        let mut convo = conversation_with(Arc::new(SilentSynthesizer), Some(Arc::new(FailingChat)));
        let exchange = convo.handle_utterance("quero uma receita").await.unwrap();

        assert_eq!(exchange.reply, APOLOGY);
        let last = convo.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.text, APOLOGY);
    }

    #[tokio::test]
    async fn test_remote_reply_used_verbatim() {
        let mut convo = conversation_with(
            Arc::new(SilentSynthesizer),
            Some(Arc::new(FixedChat("Que tal uma salada?"))),
        );
        let exchange = convo.handle_utterance("quero uma receita").await.unwrap();
        assert_eq!(exchange.reply, "Que tal uma salada?");
    }

    #[tokio::test]
    async fn test_remote_request_carries_history_and_name() {
        let chat = Arc::new(CapturingChat::default());
        let mut convo = conversation_with(Arc::new(SilentSynthesizer), Some(chat.clone()));
        convo.handle_utterance("meu nome é Bia").await.unwrap();
        convo.handle_utterance("estou cansada").await.unwrap();

        let requests = chat.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].user_name, "Bia");
        assert_eq!(requests[0].intent, Some(IntentKind::SetName));
        assert_eq!(requests[1].messages.len(), 3);
        assert_eq!(requests[1].user_name, "Bia");
        assert_eq!(requests[1].intent, Some(IntentKind::Energy));
    }

    #[tokio::test]
    async fn test_voice_follows_user_gender_and_emotion() {
        let synth = Arc::new(RecordingSynth::default());
        let mut convo = conversation_with(synth.clone(), None);
        convo.handle_utterance("meu nome é Carla").await.unwrap();
        convo.handle_utterance("estou triste hoje").await.unwrap();

        let spoken = synth.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[1].1.gender, Gender::Female);
        assert_eq!(spoken[1].1.rate, 0.85);
    }

    #[tokio::test]
    async fn test_activate_and_deactivate() {
        let synth = Arc::new(RecordingSynth::default());
        let mut convo = conversation_with(synth.clone(), None);

        let greeting = convo.activate().await.unwrap();
        assert!(convo.is_active());
        assert!(greeting.starts_with("Oi, eu sou seu NutriAI!"));
        assert_eq!(synth.spoken.lock().unwrap().len(), 1);

        convo.handle_utterance("Carla").await.unwrap();
        convo.deactivate().await;

        assert!(!convo.is_active());
        assert_eq!(convo.context(), &ConversationContext::default());
        assert!(convo.messages().is_empty());
        assert_eq!(convo.user_gender(), Gender::Male);
    }

    #[tokio::test]
    async fn test_welcome_back_only_after_onboarding() {
        let mut convo = conversation();
        let mut profile = ResolvedProfile::anonymous();
        assert!(convo.greet_returning_user(&profile).await.is_none());

        profile.name = Some("Fernanda Lima".to_string());
        profile.gender = Gender::Female;
        profile.onboarding_completed = true;
        let greeting = convo.greet_returning_user(&profile).await.unwrap();
        assert_eq!(greeting, "Bem-vinda de volta, Fernanda! Pronta para arrasar hoje?");
    }

    #[tokio::test]
    async fn test_returning_user_skips_name_prompt() {
        let synth = Arc::new(RecordingSynth::default());
        let mut convo = conversation_with(synth.clone(), None);
        let mut profile = ResolvedProfile::anonymous();
        profile.name = Some("Fernanda Lima".to_string());
        profile.gender = Gender::Female;
        profile.onboarding_completed = true;

        convo.greet_returning_user(&profile).await.unwrap();
        assert_eq!(convo.activate().await, None);
        assert_eq!(convo.context().user_name.as_deref(), Some("Fernanda"));
        assert!(convo.context().has_introduced);

        let exchange = convo.handle_utterance("quero emagrecer").await.unwrap();
        assert_eq!(exchange.intent.kind, IntentKind::WeightLoss);
        assert!(exchange.reply.contains("Fernanda"));

        let spoken = synth.spoken.lock().unwrap();
        assert_eq!(spoken.len(), 2);
        assert!(spoken.iter().all(|(_, voice)| voice.gender == Gender::Female));
    }

    #[tokio::test]
    async fn test_new_session_after_deactivate_asks_name_again() {
        let mut convo = conversation();
        let mut profile = ResolvedProfile::anonymous();
        profile.name = Some("Fernanda".to_string());
        profile.onboarding_completed = true;
        convo.greet_returning_user(&profile).await.unwrap();
        convo.activate().await;
        convo.deactivate().await;

        assert!(convo.activate().await.is_some());
    }

    #[tokio::test]
    async fn test_transcript_after_deactivate_is_ignored() {
        let mut convo = conversation();
        convo.activate().await;
        convo.deactivate().await;

        let late = RecognitionEvent::Transcript {
            text: "meu nome é Carla".to_string(),
            is_final: true,
        };
        assert!(convo.on_recognition_event(late).await.is_none());
        assert!(convo.messages().is_empty());
        assert_eq!(convo.context(), &ConversationContext::default());
        assert!(convo.memory().is_empty());
    }

    #[tokio::test]
    async fn test_final_transcript_runs_a_turn() {
        let mut convo = conversation();
        convo.activate().await;
        let event = RecognitionEvent::Transcript {
            text: "  Carla ".to_string(),
            is_final: true,
        };
        let exchange = convo.on_recognition_event(event).await.unwrap();
        assert_eq!(exchange.intent.name(), Some("Carla"));

        let interim = RecognitionEvent::Transcript {
            text: "quero".to_string(),
            is_final: false,
        };
        assert!(convo.on_recognition_event(interim).await.is_none());
    }
}
