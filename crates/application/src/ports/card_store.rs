//! Card storage backend port
//!
//! A single storage strategy (networked document store or in-process map).
//! Every call reports backend trouble as [`StorageError::BackendUnavailable`]
//! instead of panicking or hiding it, so that a caller can decide to switch
//! strategies.

use async_trait::async_trait;
use domain::{Card, CardId, CardPatch};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Outcome of a failed backend call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Backend could not complete the call (connection, timeout, protocol
    /// or decoding failure)
    #[error("Storage backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl StorageError {
    /// Create a backend-unavailable error from anything printable
    pub fn unavailable(reason: impl std::fmt::Display) -> Self {
        Self::BackendUnavailable(reason.to_string())
    }
}

/// Result alias for backend calls
pub type StorageResult<T> = Result<T, StorageError>;

/// Port for one card storage backend
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CardStorePort: Send + Sync {
    /// Persist a complete card
    async fn insert(&self, card: &Card) -> StorageResult<()>;

    /// Fetch a card by ID
    ///
    /// # Returns
    /// `Ok(None)` when the ID is unknown
    async fn find(&self, id: &CardId) -> StorageResult<Option<Card>>;

    /// Fetch every card, in backend order
    async fn find_all(&self) -> StorageResult<Vec<Card>>;

    /// Apply the present fields of `patch` to a card
    ///
    /// # Returns
    /// The updated card, or `Ok(None)` when the ID is unknown
    async fn update(&self, id: &CardId, patch: &CardPatch) -> StorageResult<Option<Card>>;

    /// Remove a card
    ///
    /// # Returns
    /// `true` if a card was removed
    async fn delete(&self, id: &CardId) -> StorageResult<bool>;

    /// Lightweight liveness check
    async fn ping(&self) -> StorageResult<()>;

    /// Release any held connection
    async fn close(&self);

    /// Short backend name for logs and status output
    fn backend_name(&self) -> &'static str;
}
