//! Integration tests for infrastructure adapters
//!
//! Tests cover:
//! - Flashcard generation through the Gemini engine against a mocked API
//! - Speech synthesis through the Google Translate TTS provider

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use ai_core::{GeminiInferenceEngine, InferenceConfig};
use ai_speech::SpeechConfig;
use application::ports::{FlashcardGeneratorPort, SpeechPort};
use domain::Language;
use infrastructure::{GeminiFlashcardGenerator, SpeechAdapter};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generator_for(server: &MockServer) -> GeminiFlashcardGenerator {
    let config = InferenceConfig {
        base_url: server.uri(),
        default_model: "text-model".to_string(),
        vision_model: "vision-model".to_string(),
        timeout_ms: 5000,
        ..InferenceConfig::default()
    }
    .with_api_key("test-key");
    GeminiFlashcardGenerator::new(Arc::new(GeminiInferenceEngine::new(config).unwrap()))
}

fn gemini_answer(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

// ============================================================================
// Flashcard generation
// ============================================================================

#[tokio::test]
async fn text_generation_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/text-model:generateContent"))
        .and(body_string_contains("Input: \\\"Hello\\\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_answer(
            "Translation: สวัสดี\nDescription: Someone waving hello",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let content = generator_for(&server)
        .generate_from_text("Hello", &Language::english(), &Language::thai())
        .await
        .unwrap();

    assert_eq!(content.original_text, "Hello");
    assert_eq!(content.translated_text, "สวัสดี");
    assert_eq!(content.image_description, "Someone waving hello");
}

#[tokio::test]
async fn image_analysis_uses_vision_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/vision-model:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_answer(
            "Word: Apple\nTranslation: แอปเปิล\nDescription: A red apple on a table",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let content = generator_for(&server)
        .analyze_image(&[0xFF, 0xD8, 0xFF], "image/jpeg", &Language::thai())
        .await
        .unwrap();

    assert_eq!(content.original_text, "Apple");
    assert_eq!(content.translated_text, "แอปเปิล");
}

#[tokio::test]
async fn server_error_yields_placeholder_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let generator = generator_for(&server);

    let text = generator
        .generate_from_text("Tree", &Language::english(), &Language::thai())
        .await
        .unwrap();
    assert_eq!(text.translated_text, "Tree");
    assert_eq!(text.image_description, "Visual representation of Tree");

    let image = generator
        .analyze_image(&[1, 2, 3], "image/png", &Language::thai())
        .await
        .unwrap();
    assert_eq!(image.original_text, "Unknown");
    assert_eq!(image.translated_text, "ไม่ทราบ");
}

// ============================================================================
// Speech synthesis
// ============================================================================

#[tokio::test]
async fn speech_adapter_returns_mp3() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("tl", "th"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xFB, 0x90]))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = SpeechAdapter::new(SpeechConfig {
        base_url: server.uri(),
        ..SpeechConfig::default()
    })
    .unwrap();

    let audio = adapter.synthesize("แมว", &Language::thai()).await.unwrap();

    assert_eq!(audio.content_type, "audio/mpeg");
    assert_eq!(audio.extension, "mp3");
    assert_eq!(audio.data, vec![0xFF, 0xFB, 0x90]);
}

#[tokio::test]
async fn speech_adapter_reports_upstream_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let adapter = SpeechAdapter::new(SpeechConfig {
        base_url: server.uri(),
        ..SpeechConfig::default()
    })
    .unwrap();

    let err = adapter
        .synthesize("Hello", &Language::english())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Synthesis failed"));
}
