//! Process-local card store
//!
//! Lives for the process lifetime and is lost on restart.

use std::collections::HashMap;

use application::ports::{CardStorePort, StorageResult};
use async_trait::async_trait;
use domain::{Card, CardId, CardPatch};
use parking_lot::RwLock;

/// In-memory card store keyed by card ID
#[derive(Debug, Default)]
pub struct InMemoryCardStore {
    cards: RwLock<HashMap<CardId, Card>>,
}

impl InMemoryCardStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a card, replacing any card with the same ID
    pub fn put(&self, card: Card) {
        self.cards.write().insert(card.id.clone(), card);
    }

    /// Get a copy of a card
    pub fn get(&self, id: &CardId) -> Option<Card> {
        self.cards.read().get(id).cloned()
    }

    /// Copy every card
    pub fn all(&self) -> Vec<Card> {
        self.cards.read().values().cloned().collect()
    }

    /// Merge the present fields of `patch` into a card under the write lock
    pub fn patch(&self, id: &CardId, patch: &CardPatch) -> Option<Card> {
        let mut cards = self.cards.write();
        let card = cards.get_mut(id)?;
        card.apply(patch);
        Some(card.clone())
    }

    /// Remove a card
    pub fn remove(&self, id: &CardId) -> bool {
        self.cards.write().remove(id).is_some()
    }

    /// Number of stored cards
    pub fn len(&self) -> usize {
        self.cards.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.cards.read().is_empty()
    }
}

#[async_trait]
impl CardStorePort for InMemoryCardStore {
    async fn insert(&self, card: &Card) -> StorageResult<()> {
        self.put(card.clone());
        Ok(())
    }

    async fn find(&self, id: &CardId) -> StorageResult<Option<Card>> {
        Ok(self.get(id))
    }

    async fn find_all(&self) -> StorageResult<Vec<Card>> {
        Ok(self.all())
    }

    async fn update(&self, id: &CardId, patch: &CardPatch) -> StorageResult<Option<Card>> {
        Ok(self.patch(id, patch))
    }

    async fn delete(&self, id: &CardId) -> StorageResult<bool> {
        Ok(self.remove(id))
    }

    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn close(&self) {}

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
