//! Configuration for speech processing

use serde::{Deserialize, Serialize};

/// Configuration for the speech synthesis provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Base URL of the Google Translate host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum characters sent per request; longer text is split
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Speak at reduced speed
    #[serde(default)]
    pub slow: bool,
}

fn default_base_url() -> String {
    "https://translate.google.com".to_string()
}

const fn default_timeout_ms() -> u64 {
    15000
}

const fn default_max_chunk_chars() -> usize {
    100
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            max_chunk_chars: default_max_chunk_chars(),
            slow: false,
        }
    }
}

impl SpeechConfig {
    /// Speech speed parameter understood by the endpoint
    #[must_use]
    pub const fn speed(&self) -> &'static str {
        if self.slow { "0.3" } else { "1" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SpeechConfig::default();
        assert_eq!(config.base_url, "https://translate.google.com");
        assert_eq!(config.max_chunk_chars, 100);
        assert!(!config.slow);
        assert_eq!(config.speed(), "1");
    }

    #[test]
    fn slow_speed() {
        let config = SpeechConfig {
            slow: true,
            ..Default::default()
        };
        assert_eq!(config.speed(), "0.3");
    }

    #[test]
    fn deserializes_from_toml_with_defaults() {
        let config: SpeechConfig = toml::from_str("slow = true\ntimeout_ms = 500").unwrap();
        assert!(config.slow);
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.max_chunk_chars, 100);
    }
}
