//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod card_repository;
mod card_store;
mod flashcard_generator_port;
mod speech_port;

#[cfg(test)]
pub use card_repository::MockCardRepositoryPort;
pub use card_repository::{CardRepositoryPort, StorageMode};
#[cfg(test)]
pub use card_store::MockCardStorePort;
pub use card_store::{CardStorePort, StorageError, StorageResult};
#[cfg(test)]
pub use flashcard_generator_port::MockFlashcardGeneratorPort;
pub use flashcard_generator_port::FlashcardGeneratorPort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::{SpeechAudio, SpeechPort};
