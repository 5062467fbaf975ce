//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the MongoDB and in-memory card stores, the Gemini generator and
//! the speech adapter, plus application configuration.

pub mod adapters;
pub mod config;
pub mod persistence;

pub use adapters::*;
pub use config::{AppConfig, DatabaseConfig, Environment, ServerConfig};
pub use persistence::{InMemoryCardStore, MongoCardStore, StorageManager};
