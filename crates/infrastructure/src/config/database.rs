//! Card database (MongoDB) configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Default connection string used when nothing is configured
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/";

/// Default database name
pub const DEFAULT_DATABASE_NAME: &str = "flashcard_db";

/// Document database configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Whether to try the document database at all; when false the
    /// in-process store is used from the start
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// MongoDB connection string
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database name
    #[serde(default = "default_name")]
    pub name: String,

    /// Collection holding the cards
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Server selection and connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_uri() -> String {
    DEFAULT_MONGO_URI.to_string()
}

fn default_name() -> String {
    DEFAULT_DATABASE_NAME.to_string()
}

fn default_collection() -> String {
    "flashcards".to_string()
}

const fn default_connect_timeout_ms() -> u64 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            uri: default_uri(),
            name: default_name(),
            collection: default_collection(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Connection string with any `user:password@` part masked
    pub fn redacted_uri(&self) -> String {
        let Some((scheme, rest)) = self.uri.split_once("://") else {
            return self.uri.clone();
        };
        let authority_end = rest.find('/').unwrap_or(rest.len());
        match rest[..authority_end].rfind('@') {
            Some(at) => format!("{scheme}://***@{}", &rest[at + 1..]),
            None => self.uri.clone(),
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("enabled", &self.enabled)
            .field("uri", &self.redacted_uri())
            .field("name", &self.name)
            .field("collection", &self.collection)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .finish()
    }
}
