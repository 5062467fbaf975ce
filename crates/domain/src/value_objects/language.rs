//! Language codes used for translation prompts and speech synthesis

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// ISO 639-1 style language code (e.g. "en", "th")
///
/// Codes without a known display name are passed through verbatim, so a
/// caller may ask for any language the model understands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    /// English
    pub fn english() -> Self {
        Self("en".to_string())
    }

    /// Thai
    pub fn thai() -> Self {
        Self("th".to_string())
    }

    /// Create a language code, normalising case and whitespace
    ///
    /// # Errors
    /// Returns an error if the code is empty
    pub fn new(code: impl AsRef<str>) -> Result<Self, DomainError> {
        let code = code.as_ref().trim().to_lowercase();
        if code.is_empty() {
            return Err(DomainError::ValidationError(
                "Language code cannot be empty".to_string(),
            ));
        }
        Ok(Self(code))
    }

    /// The raw code
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Human readable name used in prompts
    pub fn display_name(&self) -> &str {
        match self.0.as_str() {
            "en" => "English",
            "th" => "Thai",
            other => other,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Language {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.0
    }
}

/// Thai script block
const THAI_RANGE: std::ops::RangeInclusive<char> = '\u{0E00}'..='\u{0E7F}';

/// Pick the speech language for a piece of text
///
/// Any character from the Thai block selects Thai, everything else is read
/// as English.
pub fn detect_speech_language(text: &str) -> Language {
    if text.chars().any(|c| THAI_RANGE.contains(&c)) {
        Language::thai()
    } else {
        Language::english()
    }
}
