//! Speech processing provider implementations
//!
//! Contains concrete implementations of the `TextToSpeech` trait.

pub mod google_translate;

pub use google_translate::GoogleTranslateTts;
