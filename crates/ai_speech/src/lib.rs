//! AI Speech - Text-to-Speech abstractions
//!
//! Provides a trait and an implementation for speech synthesis:
//! - `TextToSpeech` - Synthesize speech from text (TTS)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the trait (port)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Supported Providers
//!
//! - Google Translate TTS endpoint (MP3 output, no API key)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{GoogleTranslateTts, SpeechConfig, TextToSpeech};
//!
//! let provider = GoogleTranslateTts::new(SpeechConfig::default())?;
//! let audio = provider.synthesize("สวัสดี", "th").await?;
//! std::fs::write("hello.mp3", audio.data())?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use ports::TextToSpeech;
pub use providers::GoogleTranslateTts;
pub use types::{AudioData, AudioFormat};
