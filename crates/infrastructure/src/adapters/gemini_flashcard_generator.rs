//! Flashcard generator adapter - Implements FlashcardGeneratorPort using ai_core
//!
//! Builds the translation and image-analysis prompts, sends them through an
//! [`InferenceEngine`] and parses the labelled lines of the answer. Inference
//! failures never reach the caller: a placeholder card is returned instead.

use std::sync::Arc;
use std::time::Instant;

use ai_core::{InferenceConfig, InferenceEngine, InferenceRequest};
use application::{error::ApplicationError, ports::FlashcardGeneratorPort};
use async_trait::async_trait;
use domain::{CardContent, Language};
use tracing::{debug, info, instrument, warn};

const UNKNOWN: &str = "Unknown";
const UNKNOWN_THAI: &str = "ไม่ทราบ";
const IMAGE_CONTENT: &str = "Image content";
const IMAGE_ANALYSIS_FAILED: &str = "Unable to analyze image";

/// Adapter producing card content with a Gemini-style model
pub struct GeminiFlashcardGenerator {
    engine: Option<Arc<dyn InferenceEngine>>,
}

impl std::fmt::Debug for GeminiFlashcardGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiFlashcardGenerator")
            .field("model", &self.engine.as_ref().map(|e| e.default_model()))
            .finish()
    }
}

impl GeminiFlashcardGenerator {
    /// Create a generator on top of an inference engine
    pub fn new(engine: Arc<dyn InferenceEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// Create a generator that only ever returns placeholder content
    pub const fn unconfigured() -> Self {
        Self { engine: None }
    }

    /// Build a Gemini-backed generator from configuration
    ///
    /// A missing API key is not fatal: the generator then answers with
    /// placeholder content.
    pub fn from_config(config: InferenceConfig) -> Self {
        match ai_core::GeminiInferenceEngine::new(config) {
            Ok(engine) => Self::new(Arc::new(engine)),
            Err(e) => {
                warn!(error = %e, "Gemini not configured, flashcards will use placeholder content");
                Self::unconfigured()
            },
        }
    }

    async fn ask(&self, request: InferenceRequest) -> Result<String, ApplicationError> {
        let engine = self
            .engine
            .as_ref()
            .ok_or_else(|| ApplicationError::Configuration("No inference engine".to_string()))?;

        let start = Instant::now();
        let response = engine.generate(request).await.map_err(Self::map_error)?;
        debug!(
            model = %response.model,
            latency_ms = start.elapsed().as_millis() as u64,
            "Inference complete"
        );
        Ok(response.content)
    }

    /// Convert ai_core error to application error
    fn map_error(e: ai_core::InferenceError) -> ApplicationError {
        match e {
            ai_core::InferenceError::RateLimited => ApplicationError::RateLimited,
            ai_core::InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Gemini connection failed: {msg}"))
            },
            ai_core::InferenceError::MissingApiKey => {
                ApplicationError::Configuration("Gemini API key not configured".to_string())
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

fn text_prompt(text: &str, source: &Language, target: &Language) -> String {
    format!(
        "You are a language learning assistant. Given a word or phrase in {source}, provide:\n\
         1. The translation in {target}\n\
         2. A brief description of the word/phrase that would help create a visual representation\n\
         \n\
         Input: \"{text}\"\n\
         \n\
         Please respond in the following format:\n\
         Translation: [translation here]\n\
         Description: [brief visual description here]\n",
        source = source.display_name(),
        target = target.display_name(),
    )
}

fn image_prompt(target: &Language) -> String {
    format!(
        "Analyze this image and provide:\n\
         1. A single word or short phrase in English that best describes the main subject or object in the image\n\
         2. The translation of that word/phrase in {target}\n\
         3. A brief description of what you see in the image\n\
         \n\
         Please respond in the following format:\n\
         Word: [English word/phrase]\n\
         Translation: [translation in {target}]\n\
         Description: [brief description of the image]\n",
        target = target.display_name(),
    )
}

/// Labelled lines of a model answer; the last occurrence of a label wins
#[derive(Debug, Default, PartialEq, Eq)]
struct ParsedAnswer {
    word: Option<String>,
    translation: Option<String>,
    description: Option<String>,
}

fn parse_answer(answer: &str) -> ParsedAnswer {
    let mut parsed = ParsedAnswer::default();
    for line in answer.lines() {
        let (slot, rest) = if let Some(rest) = line.strip_prefix("Word:") {
            (&mut parsed.word, rest)
        } else if let Some(rest) = line.strip_prefix("Translation:") {
            (&mut parsed.translation, rest)
        } else if let Some(rest) = line.strip_prefix("Description:") {
            (&mut parsed.description, rest)
        } else {
            continue;
        };
        let value = rest.trim();
        *slot = (!value.is_empty()).then(|| value.to_string());
    }
    parsed
}

fn text_placeholder(text: &str) -> CardContent {
    CardContent {
        original_text: text.to_string(),
        translated_text: text.to_string(),
        image_description: format!("Visual representation of {text}"),
    }
}

fn image_placeholder() -> CardContent {
    CardContent {
        original_text: UNKNOWN.to_string(),
        translated_text: UNKNOWN_THAI.to_string(),
        image_description: IMAGE_ANALYSIS_FAILED.to_string(),
    }
}

#[async_trait]
impl FlashcardGeneratorPort for GeminiFlashcardGenerator {
    #[instrument(skip(self, text, source, target), fields(text_len = text.len(), source = %source, target = %target))]
    async fn generate_from_text(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
    ) -> Result<CardContent, ApplicationError> {
        let request = InferenceRequest::simple(text_prompt(text, source, target));

        let answer = match self.ask(request).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Translation failed, using placeholder content");
                return Ok(text_placeholder(text));
            },
        };

        let parsed = parse_answer(&answer);
        let fallback = text_placeholder(text);
        Ok(CardContent {
            original_text: text.to_string(),
            translated_text: parsed.translation.unwrap_or(fallback.translated_text),
            image_description: parsed.description.unwrap_or(fallback.image_description),
        })
    }

    #[instrument(skip(self, image, target), fields(image_bytes = image.len(), target = %target))]
    async fn analyze_image(
        &self,
        image: &[u8],
        mime_type: &str,
        target: &Language,
    ) -> Result<CardContent, ApplicationError> {
        let request = InferenceRequest::with_image(image_prompt(target), mime_type, image.to_vec());

        let answer = match self.ask(request).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Image analysis failed, using placeholder content");
                return Ok(image_placeholder());
            },
        };

        let parsed = parse_answer(&answer);
        let content = CardContent {
            original_text: parsed.word.unwrap_or_else(|| UNKNOWN.to_string()),
            translated_text: parsed.translation.unwrap_or_else(|| UNKNOWN.to_string()),
            image_description: parsed
                .description
                .unwrap_or_else(|| IMAGE_CONTENT.to_string()),
        };
        info!(word = %content.original_text, "Image analyzed");
        Ok(content)
    }

    async fn is_healthy(&self) -> bool {
        match &self.engine {
            Some(engine) => engine.health_check().await.unwrap_or(false),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use ai_core::{ContentPart, InferenceError, InferenceResponse};
    use parking_lot::Mutex;

    use super::*;

    /// Engine that answers with a fixed script and records requests
    #[derive(Debug)]
    struct ScriptedEngine {
        answer: Result<String, ()>,
        requests: Mutex<Vec<InferenceRequest>>,
    }

    impl ScriptedEngine {
        fn answering(answer: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: Ok(answer.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                answer: Err(()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl InferenceEngine for ScriptedEngine {
        async fn generate(
            &self,
            request: InferenceRequest,
        ) -> Result<InferenceResponse, InferenceError> {
            self.requests.lock().push(request);
            match &self.answer {
                Ok(content) => Ok(InferenceResponse {
                    content: content.clone(),
                    model: "scripted".to_string(),
                    usage: None,
                    finish_reason: Some("STOP".to_string()),
                }),
                Err(()) => Err(InferenceError::ServerError("boom".to_string())),
            }
        }

        async fn health_check(&self) -> Result<bool, InferenceError> {
            Ok(self.answer.is_ok())
        }

        fn default_model(&self) -> &str {
            "scripted"
        }
    }

    fn en() -> Language {
        Language::english()
    }

    fn th() -> Language {
        Language::thai()
    }

    #[test]
    fn parse_reads_labelled_lines() {
        let parsed = parse_answer(
            "Word: Cat\nTranslation:  แมว \nDescription: A small furry animal\nExtra: ignored",
        );
        assert_eq!(
            parsed,
            ParsedAnswer {
                word: Some("Cat".to_string()),
                translation: Some("แมว".to_string()),
                description: Some("A small furry animal".to_string()),
            }
        );
    }

    #[test]
    fn parse_ignores_indented_or_empty_values() {
        let parsed = parse_answer("  Translation: indented\nDescription:   \n");
        assert_eq!(parsed, ParsedAnswer::default());
    }

    #[test]
    fn text_prompt_uses_language_names() {
        let prompt = text_prompt("Hello", &en(), &th());
        assert!(prompt.contains("phrase in English"));
        assert!(prompt.contains("translation in Thai"));
        assert!(prompt.contains("Input: \"Hello\""));
    }

    #[test]
    fn image_prompt_passes_unknown_codes_through() {
        let prompt = image_prompt(&Language::new("ja").unwrap());
        assert!(prompt.contains("Translation: [translation in ja]"));
    }

    #[tokio::test]
    async fn generate_parses_answer() {
        let engine = ScriptedEngine::answering(
            "Translation: สวัสดี\nDescription: A person waving hello",
        );
        let generator = GeminiFlashcardGenerator::new(engine.clone());

        let content = generator
            .generate_from_text("Hello", &en(), &th())
            .await
            .unwrap();

        assert_eq!(content.original_text, "Hello");
        assert_eq!(content.translated_text, "สวัสดี");
        assert_eq!(content.image_description, "A person waving hello");

        let requests = engine.requests.lock();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].has_image());
    }

    #[tokio::test]
    async fn generate_fills_missing_lines_from_input() {
        let generator =
            GeminiFlashcardGenerator::new(ScriptedEngine::answering("I am not sure."));

        let content = generator
            .generate_from_text("Hello", &en(), &th())
            .await
            .unwrap();

        assert_eq!(content.translated_text, "Hello");
        assert_eq!(content.image_description, "Visual representation of Hello");
    }

    #[tokio::test]
    async fn generate_failure_returns_placeholder() {
        let generator = GeminiFlashcardGenerator::new(ScriptedEngine::failing());

        let content = generator
            .generate_from_text("Dog", &en(), &th())
            .await
            .unwrap();

        assert_eq!(content, text_placeholder("Dog"));
    }

    #[tokio::test]
    async fn unconfigured_generator_returns_placeholders() {
        let generator = GeminiFlashcardGenerator::unconfigured();

        let text = generator.generate_from_text("Dog", &en(), &th()).await.unwrap();
        assert_eq!(text.translated_text, "Dog");

        let image = generator
            .analyze_image(&[1, 2, 3], "image/png", &th())
            .await
            .unwrap();
        assert_eq!(image, image_placeholder());
        assert!(!generator.is_healthy().await);
    }

    #[tokio::test]
    async fn analyze_sends_image_after_prompt() {
        let engine = ScriptedEngine::answering(
            "Word: Cat\nTranslation: แมว\nDescription: A cat on a sofa",
        );
        let generator = GeminiFlashcardGenerator::new(engine.clone());

        let content = generator
            .analyze_image(&[0x89, 0x50], "image/png", &th())
            .await
            .unwrap();

        assert_eq!(content.original_text, "Cat");
        assert_eq!(content.translated_text, "แมว");
        assert_eq!(content.image_description, "A cat on a sofa");

        let requests = engine.requests.lock();
        assert!(matches!(requests[0].parts[0], ContentPart::Text(_)));
        assert_eq!(
            requests[0].parts[1],
            ContentPart::Image {
                mime_type: "image/png".to_string(),
                data: vec![0x89, 0x50],
            }
        );
    }

    #[tokio::test]
    async fn analyze_defaults_missing_lines() {
        let generator =
            GeminiFlashcardGenerator::new(ScriptedEngine::answering("Description: Blurry"));

        let content = generator
            .analyze_image(&[1], "image/jpeg", &th())
            .await
            .unwrap();

        assert_eq!(content.original_text, "Unknown");
        assert_eq!(content.translated_text, "Unknown");
        assert_eq!(content.image_description, "Blurry");
    }

    #[tokio::test]
    async fn analyze_failure_returns_placeholder() {
        let generator = GeminiFlashcardGenerator::new(ScriptedEngine::failing());

        let content = generator
            .analyze_image(&[1], "image/jpeg", &th())
            .await
            .unwrap();

        assert_eq!(content.translated_text, "ไม่ทราบ");
        assert_eq!(content.image_description, "Unable to analyze image");
    }

    #[tokio::test]
    async fn health_follows_engine() {
        assert!(
            GeminiFlashcardGenerator::new(ScriptedEngine::answering("ok"))
                .is_healthy()
                .await
        );
        assert!(
            !GeminiFlashcardGenerator::new(ScriptedEngine::failing())
                .is_healthy()
                .await
        );
    }

    #[test]
    fn missing_key_config_is_unconfigured() {
        let generator = GeminiFlashcardGenerator::from_config(InferenceConfig::default());
        assert!(format!("{generator:?}").contains("None"));
    }

    #[test]
    fn map_error_rate_limited() {
        assert!(matches!(
            GeminiFlashcardGenerator::map_error(InferenceError::RateLimited),
            ApplicationError::RateLimited
        ));
    }
}
