//! Flashcard generator port - Interface for AI-backed card content

use async_trait::async_trait;
use domain::{CardContent, Language};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for producing card content with a language model
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FlashcardGeneratorPort: Send + Sync {
    /// Translate a word or phrase and describe an illustrating image
    ///
    /// # Arguments
    /// * `text` - Word or phrase in the source language
    /// * `source` - Language of `text`
    /// * `target` - Language to translate into
    async fn generate_from_text(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
    ) -> Result<CardContent, ApplicationError>;

    /// Identify the main object in an image and translate its name
    ///
    /// # Arguments
    /// * `image` - Raw image bytes
    /// * `mime_type` - Image content type, e.g. `image/jpeg`
    /// * `target` - Language for the translated word
    async fn analyze_image(
        &self,
        image: &[u8],
        mime_type: &str,
        target: &Language,
    ) -> Result<CardContent, ApplicationError>;

    /// Check if the generator backend is reachable
    async fn is_healthy(&self) -> bool;
}
