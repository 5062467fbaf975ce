//! Speech adapter - Implements SpeechPort using ai_speech crate

use std::sync::Arc;

use ai_speech::{AudioData, GoogleTranslateTts, SpeechConfig, SpeechError, TextToSpeech};
use application::error::ApplicationError;
use application::ports::{SpeechAudio, SpeechPort};
use async_trait::async_trait;
use domain::Language;
use tracing::{debug, instrument};

/// Adapter for speech synthesis using ai_speech crate
pub struct SpeechAdapter {
    provider: Arc<dyn TextToSpeech>,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl SpeechAdapter {
    /// Create a speech adapter backed by Google Translate TTS
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to initialize.
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let provider = GoogleTranslateTts::new(config)
            .map_err(|e: SpeechError| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self::with_provider(Arc::new(provider)))
    }

    /// Create a speech adapter around any provider
    pub fn with_provider(provider: Arc<dyn TextToSpeech>) -> Self {
        Self { provider }
    }

    /// Map speech error to application error
    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::Configuration(e) => ApplicationError::Configuration(e),
            SpeechError::ConnectionFailed(e) | SpeechError::RequestFailed(e) => {
                ApplicationError::ExternalService(e)
            },
            SpeechError::SynthesisFailed(e) => {
                ApplicationError::ExternalService(format!("Synthesis failed: {e}"))
            },
            SpeechError::InvalidResponse(e) => {
                ApplicationError::ExternalService(format!("Invalid response: {e}"))
            },
            SpeechError::Timeout => {
                ApplicationError::ExternalService("Speech service timeout".to_string())
            },
            SpeechError::RateLimited => ApplicationError::RateLimited,
        }
    }

    fn to_speech_audio(audio: AudioData) -> SpeechAudio {
        let format = audio.format();
        SpeechAudio {
            content_type: format.mime_type().to_string(),
            extension: format.extension().to_string(),
            data: audio.into_data(),
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, text, language), fields(text_len = text.len(), language = %language))]
    async fn synthesize(
        &self,
        text: &str,
        language: &Language,
    ) -> Result<SpeechAudio, ApplicationError> {
        let audio = self
            .provider
            .synthesize(text, language.code())
            .await
            .map_err(Self::map_error)?;

        debug!(audio_size = audio.size_bytes(), "Synthesis complete");

        Ok(Self::to_speech_audio(audio))
    }
}

#[cfg(test)]
mod tests {
    use ai_speech::AudioFormat;
    use mockall::mock;

    use super::*;

    mock! {
        pub Tts {}

        #[async_trait]
        impl TextToSpeech for Tts {
            async fn synthesize(&self, text: &str, language: &str) -> Result<AudioData, SpeechError>;
            async fn is_available(&self) -> bool;
            fn provider_name(&self) -> &str;
        }
    }

    #[tokio::test]
    async fn synthesize_passes_language_code() {
        let mut tts = MockTts::new();
        tts.expect_synthesize()
            .withf(|text, language| text == "สวัสดี" && language == "th")
            .times(1)
            .returning(|_, _| Ok(AudioData::new(vec![0xFF, 0xFB], AudioFormat::Mp3)));

        let adapter = SpeechAdapter::with_provider(Arc::new(tts));
        let audio = adapter
            .synthesize("สวัสดี", &Language::thai())
            .await
            .unwrap();

        assert_eq!(audio, SpeechAudio::mp3(vec![0xFF, 0xFB]));
    }

    #[tokio::test]
    async fn rate_limit_is_preserved() {
        let mut tts = MockTts::new();
        tts.expect_synthesize()
            .returning(|_, _| Err(SpeechError::RateLimited));

        let adapter = SpeechAdapter::with_provider(Arc::new(tts));
        let err = adapter
            .synthesize("Hello", &Language::english())
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::RateLimited));
    }

    #[test]
    fn map_error_synthesis_failed() {
        let err = SpeechAdapter::map_error(SpeechError::SynthesisFailed("bad lang".to_string()));
        assert!(matches!(err, ApplicationError::ExternalService(_)));
        assert!(err.to_string().contains("bad lang"));
    }

    #[test]
    fn map_error_configuration() {
        let err = SpeechAdapter::map_error(SpeechError::Configuration("chunk".to_string()));
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn mp3_audio_carries_its_metadata() {
        let audio = SpeechAdapter::to_speech_audio(AudioData::new(vec![1], AudioFormat::Mp3));
        assert_eq!(audio.content_type, "audio/mpeg");
        assert_eq!(audio.extension, "mp3");
        assert_eq!(audio.data, vec![1]);
    }

    #[test]
    fn new_rejects_zero_chunk_size() {
        let config = SpeechConfig {
            max_chunk_chars: 0,
            ..SpeechConfig::default()
        };
        assert!(SpeechAdapter::new(config).is_err());
    }

    #[test]
    fn debug_names_provider() {
        let adapter = SpeechAdapter::new(SpeechConfig::default()).unwrap();
        assert!(format!("{adapter:?}").contains("SpeechAdapter"));
    }
}
