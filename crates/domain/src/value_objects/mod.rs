//! Value Objects - Immutable, identity-less domain primitives

mod card_id;
mod language;

pub use card_id::CardId;
pub use language::{Language, detect_speech_language};
