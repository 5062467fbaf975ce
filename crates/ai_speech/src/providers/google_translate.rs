//! Google Translate TTS provider
//!
//! Uses the public `translate_tts` endpoint that returns MP3 audio. The
//! endpoint only accepts short inputs, so text is split on whitespace into
//! chunks of at most `max_chunk_chars` characters and the MP3 frames of each
//! chunk are concatenated in order.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Text-to-speech through Google Translate
#[derive(Debug)]
pub struct GoogleTranslateTts {
    client: Client,
    config: SpeechConfig,
}

impl GoogleTranslateTts {
    /// Create a new provider
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        if config.max_chunk_chars == 0 {
            return Err(SpeechError::Configuration(
                "max_chunk_chars must be positive".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SpeechError::ConnectionFailed(e.to_string()))?;

        info!(base_url = %config.base_url, "Initialized Google Translate TTS");

        Ok(Self { client, config })
    }

    fn tts_url(&self) -> String {
        format!("{}/translate_tts", self.config.base_url.trim_end_matches('/'))
    }

    #[instrument(skip(self, chunk), fields(chunk_len = chunk.chars().count()))]
    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &str,
        idx: usize,
        total: usize,
    ) -> Result<Bytes, SpeechError> {
        let idx_param = idx.to_string();
        let total_param = total.to_string();
        let len_param = chunk.chars().count().to_string();

        let response = self
            .client
            .get(self.tts_url())
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("q", chunk),
                ("tl", language),
                ("ttsspeed", self.config.speed()),
                ("total", total_param.as_str()),
                ("idx", idx_param.as_str()),
                ("textlen", len_param.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "TTS request failed");
            return match status {
                StatusCode::TOO_MANY_REQUESTS => Err(SpeechError::RateLimited),
                StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND => Err(
                    SpeechError::SynthesisFailed(format!("language '{language}' rejected: HTTP {status}")),
                ),
                _ => Err(SpeechError::RequestFailed(format!("HTTP {status}: {body}"))),
            };
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        if audio.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "empty audio chunk".to_string(),
            ));
        }
        Ok(audio)
    }
}

/// Split text into chunks of at most `max_chars` characters
///
/// Breaks on whitespace where possible. A single word longer than the limit
/// is split at character boundaries.
pub(crate) fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word_chars: Vec<char> = word.chars().collect();

        while word_chars.len() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word_chars.split_off(max_chars);
            chunks.push(word_chars.into_iter().collect());
            word_chars = rest;
        }
        if word_chars.is_empty() {
            continue;
        }

        let extra = if current.is_empty() {
            word_chars.len()
        } else {
            word_chars.len() + 1
        };
        if current_len + extra > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word_chars.iter());
        current_len += word_chars.len();
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[async_trait]
impl TextToSpeech for GoogleTranslateTts {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str, language: &str) -> Result<AudioData, SpeechError> {
        let chunks = split_text(text, self.config.max_chunk_chars);
        if chunks.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        let total = chunks.len();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language, idx, total).await?;
            audio.extend_from_slice(&bytes);
        }

        debug!(chunks = total, audio_size = audio.len(), "Speech synthesis complete");
        Ok(AudioData::new(audio, AudioFormat::Mp3))
    }

    async fn is_available(&self) -> bool {
        match self.synthesize("ok", "en").await {
            Ok(audio) => !audio.is_empty(),
            Err(e) => {
                debug!(error = %e, "TTS availability probe failed");
                false
            },
        }
    }

    fn provider_name(&self) -> &str {
        "google-translate"
    }
}
