//! Flashcard service - Card use cases
//!
//! Orchestrates content generation, image analysis, speech and card
//! persistence. Storage is reached only through [`CardRepositoryPort`], so
//! the service never sees which backend is active.

use std::{fmt, sync::Arc};

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use domain::{
    Card, CardContent, CardId, CardPatch, DomainError, Language, NewCard, detect_speech_language,
};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{CardRepositoryPort, FlashcardGeneratorPort, SpeechAudio, SpeechPort, StorageMode},
};

/// Service for creating, reading and voicing flashcards
pub struct FlashcardService {
    repository: Arc<dyn CardRepositoryPort>,
    generator: Arc<dyn FlashcardGeneratorPort>,
    speech: Arc<dyn SpeechPort>,
}

impl fmt::Debug for FlashcardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlashcardService")
            .field("storage_mode", &self.repository.mode())
            .finish_non_exhaustive()
    }
}

impl FlashcardService {
    /// Create a new flashcard service
    pub fn new(
        repository: Arc<dyn CardRepositoryPort>,
        generator: Arc<dyn FlashcardGeneratorPort>,
        speech: Arc<dyn SpeechPort>,
    ) -> Self {
        Self {
            repository,
            generator,
            speech,
        }
    }

    /// Generate card content for a word or phrase without storing it
    #[instrument(skip(self, text, source, target), fields(text_len = text.len(), source = %source, target = %target))]
    pub async fn generate(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
    ) -> Result<CardContent, ApplicationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::ValidationError("text must not be empty".to_string()).into());
        }

        let content = self.generator.generate_from_text(text, source, target).await?;
        debug!(translated = %content.translated_text, "Generated card content");
        Ok(content)
    }

    /// Analyze an uploaded image and store the resulting card
    ///
    /// The image is kept on the card as base64 text.
    #[instrument(skip(self, image, target), fields(image_bytes = image.len(), target = %target))]
    pub async fn create_from_image(
        &self,
        image: &[u8],
        mime_type: &str,
        target: &Language,
    ) -> Result<Card, ApplicationError> {
        if image.is_empty() {
            return Err(DomainError::ValidationError("image must not be empty".to_string()).into());
        }

        let content = self.generator.analyze_image(image, mime_type, target).await?;
        let new_card = NewCard::from(content).with_image(BASE64.encode(image));
        let card = self.repository.create(new_card).await;

        info!(card_id = %card.id, "Created flashcard from image");
        Ok(card)
    }

    /// Store a card built by the caller
    #[instrument(skip(self, new_card))]
    pub async fn create(&self, new_card: NewCard) -> Card {
        let card = self.repository.create(new_card).await;
        debug!(card_id = %card.id, "Created flashcard");
        card
    }

    /// Get a card by ID
    pub async fn get(&self, id: &CardId) -> Option<Card> {
        self.repository.get(id).await
    }

    /// List every stored card
    pub async fn list(&self) -> Vec<Card> {
        self.repository.list().await
    }

    /// Apply a partial update
    #[instrument(skip(self, id, patch), fields(card_id = %id))]
    pub async fn update(&self, id: &CardId, patch: CardPatch) -> Option<Card> {
        self.repository.update(id, patch).await
    }

    /// Delete a card
    #[instrument(skip(self, id), fields(card_id = %id))]
    pub async fn delete(&self, id: &CardId) -> bool {
        self.repository.delete(id).await
    }

    /// Synthesize speech for `text`, picking the voice language from the
    /// script the text is written in
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn speak(&self, text: &str) -> Result<SpeechAudio, ApplicationError> {
        if text.trim().is_empty() {
            return Err(DomainError::ValidationError("text must not be empty".to_string()).into());
        }

        let language = detect_speech_language(text);
        debug!(language = %language, "Detected speech language");
        self.speech.synthesize(text, &language).await
    }

    /// Backend currently used for card storage
    pub fn storage_mode(&self) -> StorageMode {
        self.repository.mode()
    }

    /// Check if the content generator is reachable
    pub async fn is_generator_healthy(&self) -> bool {
        self.generator.is_healthy().await
    }

    /// Release storage connections
    pub async fn shutdown(&self) {
        self.repository.close().await;
    }
}
