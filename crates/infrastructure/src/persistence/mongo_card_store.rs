//! MongoDB card store implementation
//!
//! Implements the `CardStorePort` on top of a single MongoDB collection. Cards
//! are looked up by their own `id` field. `_id` is left to the server and is
//! ignored on read whatever its type.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use application::ports::{CardStorePort, StorageError, StorageResult};
use async_trait::async_trait;
use domain::{Card, CardId, CardPatch};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{Document, doc},
    options::{ClientOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::error::map_mongo_error;
use crate::config::DatabaseConfig;

/// Card as stored in the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDocument {
    pub id: String,
    pub original_text: String,
    pub translated_text: String,
    #[serde(default)]
    pub image_description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<&Card> for CardDocument {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id.as_str().to_string(),
            original_text: card.original_text.clone(),
            translated_text: card.translated_text.clone(),
            image_description: Some(card.image_description.clone()),
            image: Some(card.image.clone()),
        }
    }
}

impl From<CardDocument> for Card {
    fn from(doc: CardDocument) -> Self {
        Self {
            id: CardId::from(doc.id),
            original_text: doc.original_text,
            translated_text: doc.translated_text,
            image_description: doc.image_description.unwrap_or_default(),
            image: doc.image.unwrap_or_default(),
        }
    }
}

/// `$set` document for the present fields of a patch
fn set_document(patch: &CardPatch) -> Document {
    let mut set = Document::new();
    for (field, value) in patch.present_fields() {
        set.insert(field, value);
    }
    set
}

fn id_filter(id: &CardId) -> Document {
    doc! { "id": id.as_str() }
}

/// MongoDB-backed card store
pub struct MongoCardStore {
    client: Client,
    collection: Collection<CardDocument>,
    database: String,
    closed: AtomicBool,
}

impl std::fmt::Debug for MongoCardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoCardStore")
            .field("database", &self.database)
            .field("collection", &self.collection.name())
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl MongoCardStore {
    /// Connect to MongoDB and verify the server answers a `ping`
    ///
    /// Server selection and connection attempts are bounded by
    /// `config.connect_timeout_ms`.
    #[instrument(skip(config), fields(uri = %config.redacted_uri(), database = %config.name))]
    pub async fn connect(config: &DatabaseConfig) -> StorageResult<Self> {
        let timeout = Duration::from_millis(config.connect_timeout_ms);

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| map_mongo_error("connect", &e))?;
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);
        options.app_name = Some("flashcard-server".to_string());

        let client = Client::with_options(options).map_err(|e| map_mongo_error("connect", &e))?;

        let store = Self {
            collection: client
                .database(&config.name)
                .collection::<CardDocument>(&config.collection),
            database: config.name.clone(),
            client,
            closed: AtomicBool::new(false),
        };

        if let Err(e) = store.ping().await {
            store.close().await;
            return Err(e);
        }

        info!("Connected to MongoDB");
        Ok(store)
    }

    fn ensure_open(&self) -> StorageResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::unavailable("MongoDB client is closed"));
        }
        Ok(())
    }
}

#[async_trait]
impl CardStorePort for MongoCardStore {
    #[instrument(skip(self, card), fields(card_id = %card.id))]
    async fn insert(&self, card: &Card) -> StorageResult<()> {
        self.ensure_open()?;
        self.collection
            .insert_one(CardDocument::from(card))
            .await
            .map_err(|e| map_mongo_error("insert", &e))?;
        debug!("Inserted card");
        Ok(())
    }

    #[instrument(skip(self, id), fields(card_id = %id))]
    async fn find(&self, id: &CardId) -> StorageResult<Option<Card>> {
        self.ensure_open()?;
        let found = self
            .collection
            .find_one(id_filter(id))
            .await
            .map_err(|e| map_mongo_error("find", &e))?;
        Ok(found.map(Card::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> StorageResult<Vec<Card>> {
        self.ensure_open()?;
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| map_mongo_error("find", &e))?;
        let documents: Vec<CardDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| map_mongo_error("cursor", &e))?;
        debug!(count = documents.len(), "Loaded cards");
        Ok(documents.into_iter().map(Card::from).collect())
    }

    #[instrument(skip(self, id, patch), fields(card_id = %id))]
    async fn update(&self, id: &CardId, patch: &CardPatch) -> StorageResult<Option<Card>> {
        // An empty $set is rejected by the server
        if patch.is_empty() {
            return self.find(id).await;
        }
        self.ensure_open()?;

        let updated = self
            .collection
            .find_one_and_update(id_filter(id), doc! { "$set": set_document(patch) })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| map_mongo_error("update", &e))?;
        Ok(updated.map(Card::from))
    }

    #[instrument(skip(self, id), fields(card_id = %id))]
    async fn delete(&self, id: &CardId) -> StorageResult<bool> {
        self.ensure_open()?;
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(|e| map_mongo_error("delete", &e))?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> StorageResult<()> {
        self.ensure_open()?;
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| map_mongo_error("ping", &e))?;
        Ok(())
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.client.clone().shutdown().await;
        info!("MongoDB client closed");
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}
