//! Application state shared across handlers

use std::sync::Arc;

use application::FlashcardService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Flashcard use cases
    pub flashcards: Arc<FlashcardService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state from a service and configuration
    pub fn new(flashcards: Arc<FlashcardService>, config: AppConfig) -> Self {
        Self {
            flashcards,
            config: Arc::new(config),
        }
    }
}
