//! Port definitions for speech processing
//!
//! Defines the trait (port) that speech synthesis adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::AudioData;

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations of this trait convert text to audio speech.
///
/// # Example
///
/// ```ignore
/// use ai_speech::TextToSpeech;
///
/// async fn speak(tts: &impl TextToSpeech, text: &str) -> Result<Vec<u8>, SpeechError> {
///     let audio = tts.synthesize(text, "en").await?;
///     Ok(audio.into_data())
/// }
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech
    ///
    /// # Arguments
    ///
    /// * `text` - Text to synthesize
    /// * `language` - ISO 639-1 language code of the voice (e.g., "en", "th")
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if synthesis fails.
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioData, SpeechError>;

    /// Check if the TTS service is reachable
    async fn is_available(&self) -> bool;

    /// Short provider name for logs
    fn provider_name(&self) -> &str;
}
