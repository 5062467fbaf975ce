//! Application services

mod flashcard_service;

pub use flashcard_service::FlashcardService;
