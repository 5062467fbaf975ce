//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: MongoDB connection settings
//!
//! Inference and speech settings reuse the config types of `ai_core` and
//! `ai_speech`.

mod database;
mod server;

use std::fmt;

use ai_core::InferenceConfig;
use ai_speech::SpeechConfig;
use serde::{Deserialize, Serialize};

pub use database::{DEFAULT_DATABASE_NAME, DEFAULT_MONGO_URI, DatabaseConfig};
pub use server::ServerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Controls how much error detail reaches clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - error details are shown
    #[default]
    Development,
    /// Production environment - internal error details are hidden
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Card database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Gemini inference configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Speech synthesis configuration
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration, reading the legacy unprefixed variables
    /// (`MONGO_URI`, `DATABASE_NAME`, `GEMINI_API_KEY`) through `legacy`
    ///
    /// Legacy values only seed the defaults: `config.toml` and
    /// `FLASHCARDS_*` variables take precedence over them.
    pub fn load_with(
        legacy: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default(
                "database.uri",
                legacy("MONGO_URI").unwrap_or_else(|| DEFAULT_MONGO_URI.to_string()),
            )?
            .set_default(
                "database.name",
                legacy("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            )?;

        if let Some(key) = legacy("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            builder = builder.set_default("inference.api_key", key)?;
        }

        let config = builder
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., FLASHCARDS_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("FLASHCARDS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Effective environment (development unless configured)
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn environment_default_is_development() {
        assert_eq!(Environment::default(), Environment::Development);
        assert_eq!(AppConfig::default().environment(), Environment::Development);
    }

    #[test]
    fn environment_from_str() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(
            "Development".parse::<Environment>(),
            Ok(Environment::Development)
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn environment_serialize() {
        let json = serde_json::to_string(&Environment::Production).unwrap();
        assert_eq!(json, "\"production\"");
    }

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.database.name, "flashcard_db");
        assert!(!config.inference.has_api_key());
    }

    #[test]
    fn load_without_legacy_vars_uses_defaults() {
        let config = AppConfig::load_with(lookup(&[])).unwrap();
        assert_eq!(config.database.uri, DEFAULT_MONGO_URI);
        assert_eq!(config.database.name, DEFAULT_DATABASE_NAME);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn legacy_vars_seed_database_and_key() {
        let config = AppConfig::load_with(lookup(&[
            ("MONGO_URI", "mongodb://db.internal:27017/"),
            ("DATABASE_NAME", "cards"),
            ("GEMINI_API_KEY", "gk-123"),
        ]))
        .unwrap();

        assert_eq!(config.database.uri, "mongodb://db.internal:27017/");
        assert_eq!(config.database.name, "cards");
        assert!(config.inference.has_api_key());
    }

    #[test]
    fn blank_legacy_key_is_ignored() {
        let config = AppConfig::load_with(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap();
        assert!(!config.inference.has_api_key());
    }

    #[test]
    fn app_config_deserialization_from_toml() {
        let toml = r#"
            environment = "production"

            [server]
            port = 9000
            log_format = "json"

            [database]
            enabled = false
            connect_timeout_ms = 250
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.environment(), Environment::Production);
        assert_eq!(config.server.port, 9000);
        assert!(config.server.json_logs());
        assert!(!config.database.enabled);
        assert_eq!(config.database.connect_timeout_ms, 250);
        assert_eq!(config.database.collection, "flashcards");
    }

    #[test]
    fn server_bind_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert!(!config.json_logs());
    }

    #[test]
    fn config_has_debug_impl() {
        let config = AppConfig::default();
        let debug = format!("{config:?}");
        assert!(debug.contains("AppConfig"));
        assert!(debug.contains("database"));
    }
}
