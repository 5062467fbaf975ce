//! AI Core - Generative model client
//!
//! Provides an abstraction for multimodal LLM inference and an adapter for
//! the Google Gemini `generateContent` REST API.

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use gemini::GeminiInferenceEngine;
pub use ports::{ContentPart, InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};
