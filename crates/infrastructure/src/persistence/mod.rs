//! Persistence module
//!
//! Card storage backends and the manager that chooses between them:
//! MongoDB while it is reachable, an in-process map after that.

pub mod error;
pub mod memory_card_store;
pub mod mongo_card_store;
pub mod storage_manager;

pub use error::map_mongo_error;
pub use memory_card_store::InMemoryCardStore;
pub use mongo_card_store::{CardDocument, MongoCardStore};
pub use storage_manager::StorageManager;
