//! HTTP bridges to the NutriAI backend and the local preference cache.
//!
//! - [`HttpChatBridge`]: LLM-generated replies (`POST {messages, userName, intent}`)
//! - [`RemoteTts`]: speech synthesis returning base64 audio, exposed as a
//!   [`nutri_voice::Synthesizer`]
//! - [`HttpProfileSource`] + [`PreferenceStore`] behind [`ProfileResolver`]

pub mod chat;
mod http;
pub mod preferences;
pub mod profile;
pub mod tts;

pub use chat::{ChatBridge, ChatRequest, ChatTurn, HttpChatBridge};
pub use http::build_client;
pub use preferences::{PreferenceStore, Preferences};
pub use profile::{HttpProfileSource, Profile, ProfileOrigin, ProfileResolver, ProfileSource, ResolvedProfile};
pub use tts::RemoteTts;
