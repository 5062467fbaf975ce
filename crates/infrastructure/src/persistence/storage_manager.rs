//! Storage manager with one-way fallback
//!
//! Routes every card operation to the MongoDB store while it works. The first
//! backend failure switches the manager to the in-process store for the rest
//! of the process lifetime, and the failed operation is replayed there so
//! callers never see a storage error.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use application::ports::{CardRepositoryPort, CardStorePort, StorageError, StorageMode};
use async_trait::async_trait;
use domain::{Card, CardId, CardPatch, NewCard};
use tracing::{debug, info, instrument, warn};

use super::{InMemoryCardStore, MongoCardStore};
use crate::config::DatabaseConfig;

/// Card repository that degrades from a primary store to memory
pub struct StorageManager {
    primary: Option<Arc<dyn CardStorePort>>,
    fallback: InMemoryCardStore,
    degraded: AtomicBool,
}

impl std::fmt::Debug for StorageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageManager")
            .field("mode", &self.mode())
            .field(
                "primary",
                &self.primary.as_ref().map(|p| p.backend_name()),
            )
            .field("fallback_cards", &self.fallback.len())
            .finish_non_exhaustive()
    }
}

impl StorageManager {
    /// Connect to MongoDB, starting in fallback mode when that fails
    ///
    /// Never fails: a disabled database or any connection error yields a
    /// manager backed by the in-process store.
    pub async fn connect(config: &DatabaseConfig) -> Self {
        if !config.enabled {
            info!("Database disabled, using in-memory card storage");
            return Self::fallback_only();
        }

        match MongoCardStore::connect(config).await {
            Ok(store) => Self::with_primary(Arc::new(store)),
            Err(e) => {
                warn!(
                    error = %e,
                    uri = %config.redacted_uri(),
                    "MongoDB unavailable at startup, using in-memory card storage"
                );
                Self::fallback_only()
            },
        }
    }

    /// Create a manager that starts on the given primary store
    pub fn with_primary(primary: Arc<dyn CardStorePort>) -> Self {
        Self {
            primary: Some(primary),
            fallback: InMemoryCardStore::new(),
            degraded: AtomicBool::new(false),
        }
    }

    /// Create a manager that only ever uses the in-process store
    pub fn fallback_only() -> Self {
        Self {
            primary: None,
            fallback: InMemoryCardStore::new(),
            degraded: AtomicBool::new(true),
        }
    }

    /// Number of cards held by the in-process store
    pub fn fallback_len(&self) -> usize {
        self.fallback.len()
    }

    /// Primary store while it is still authoritative
    fn active_primary(&self) -> Option<&Arc<dyn CardStorePort>> {
        if self.degraded.load(Ordering::Acquire) {
            return None;
        }
        self.primary.as_ref()
    }

    /// Switch to the fallback store for good
    fn degrade(&self, operation: &'static str, error: &StorageError) {
        if !self.degraded.swap(true, Ordering::AcqRel) {
            warn!(
                operation,
                error = %error,
                "Primary card storage failed, switching to in-memory storage"
            );
        }
    }
}

#[async_trait]
impl CardRepositoryPort for StorageManager {
    #[instrument(skip(self, card))]
    async fn create(&self, card: NewCard) -> Card {
        // The ID is fixed before the first attempt so a replay keeps it
        let card = Card::from_new(card);

        if let Some(primary) = self.active_primary() {
            match primary.insert(&card).await {
                Ok(()) => {
                    debug!(card_id = %card.id, "Card stored in primary");
                    return card;
                },
                Err(e) => self.degrade("create", &e),
            }
        }

        self.fallback.put(card.clone());
        debug!(card_id = %card.id, "Card stored in memory");
        card
    }

    #[instrument(skip(self, id), fields(card_id = %id))]
    async fn get(&self, id: &CardId) -> Option<Card> {
        if let Some(primary) = self.active_primary() {
            match primary.find(id).await {
                Ok(card) => return card,
                Err(e) => self.degrade("get", &e),
            }
        }
        self.fallback.get(id)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Vec<Card> {
        if let Some(primary) = self.active_primary() {
            match primary.find_all().await {
                Ok(cards) => return cards,
                Err(e) => self.degrade("list", &e),
            }
        }
        self.fallback.all()
    }

    #[instrument(skip(self, id, patch), fields(card_id = %id))]
    async fn update(&self, id: &CardId, patch: CardPatch) -> Option<Card> {
        if let Some(primary) = self.active_primary() {
            match primary.update(id, &patch).await {
                Ok(card) => return card,
                Err(e) => self.degrade("update", &e),
            }
        }
        self.fallback.patch(id, &patch)
    }

    #[instrument(skip(self, id), fields(card_id = %id))]
    async fn delete(&self, id: &CardId) -> bool {
        if let Some(primary) = self.active_primary() {
            match primary.delete(id).await {
                Ok(removed) => return removed,
                Err(e) => self.degrade("delete", &e),
            }
        }
        self.fallback.remove(id)
    }

    fn mode(&self) -> StorageMode {
        if self.degraded.load(Ordering::Acquire) {
            StorageMode::Fallback
        } else {
            StorageMode::Primary
        }
    }

    async fn close(&self) {
        if let Some(primary) = &self.primary {
            primary.close().await;
        }
    }
}
