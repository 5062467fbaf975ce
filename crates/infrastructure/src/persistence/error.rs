//! Shared error mapping for the MongoDB persistence layer

use std::fmt::Display;

use application::ports::StorageError;

/// Map a driver error to a backend-unavailable storage error
///
/// Every driver failure (selection timeout, network, auth, write or decode
/// error) means the backend could not serve the call.
pub fn map_mongo_error(operation: &'static str, e: &impl Display) -> StorageError {
    StorageError::BackendUnavailable(format!("MongoDB {operation} failed: {e}"))
}
