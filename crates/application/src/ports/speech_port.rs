//! Speech port - Interface for text-to-speech synthesis

use async_trait::async_trait;
use domain::Language;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Synthesized speech ready to hand to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    /// Encoded audio bytes
    pub data: Vec<u8>,
    /// MIME type of `data`, e.g. `audio/mpeg`
    pub content_type: String,
    /// File extension without the dot, e.g. `mp3`
    pub extension: String,
}

impl SpeechAudio {
    /// MP3 audio
    pub fn mp3(data: Vec<u8>) -> Self {
        Self {
            data,
            content_type: "audio/mpeg".to_string(),
            extension: "mp3".to_string(),
        }
    }
}

/// Port for speech synthesis
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Synthesize speech for `text` spoken in `language`
    async fn synthesize(
        &self,
        text: &str,
        language: &Language,
    ) -> Result<SpeechAudio, ApplicationError>;
}
