//! Dialogue layer: intent classification, reply selection and the session
//! controller that ties them to speech and the remote chat bridge.

pub mod classifier;
pub mod conversation;
pub mod locale;
pub mod responder;
mod templates;

pub use classifier::{classify, extract_name, introduces_name};
pub use conversation::{Conversation, Exchange, APOLOGY};
pub use responder::{PoolKind, Reply, Responder, Turn};
