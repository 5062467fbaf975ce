//! Card repository port
//!
//! The contract the rest of the application sees for card persistence.
//! Unlike [`CardStorePort`](super::CardStorePort) it never fails: backend
//! trouble is absorbed by the implementation and callers only observe a
//! value, `None`, or a boolean.

use std::fmt;

use async_trait::async_trait;
use domain::{Card, CardId, CardPatch, NewCard};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Which backend currently receives reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Networked document store
    Primary,
    /// Process-local store
    Fallback,
}

impl StorageMode {
    /// Label used in status responses
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "MongoDB",
            Self::Fallback => "In-Memory",
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Port for card persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CardRepositoryPort: Send + Sync {
    /// Store a new card under a freshly generated ID
    async fn create(&self, card: NewCard) -> Card;

    /// Get a card by ID
    async fn get(&self, id: &CardId) -> Option<Card>;

    /// Get every card; order is unspecified
    async fn list(&self) -> Vec<Card>;

    /// Partially update a card
    ///
    /// # Returns
    /// The full updated card, or `None` if the ID is unknown
    async fn update(&self, id: &CardId, patch: CardPatch) -> Option<Card>;

    /// Delete a card
    ///
    /// # Returns
    /// `true` if a card was removed
    async fn delete(&self, id: &CardId) -> bool;

    /// Backend currently in use
    fn mode(&self) -> StorageMode;

    /// Release backend connections; safe to call more than once
    async fn close(&self);
}
