//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod gemini_flashcard_generator;
mod speech_adapter;

pub use gemini_flashcard_generator::GeminiFlashcardGenerator;
pub use speech_adapter::SpeechAdapter;
