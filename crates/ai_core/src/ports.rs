//! Port definitions for inference engine
//!
//! Defines the traits (ports) that inference adapters must implement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// One piece of a multimodal prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    /// Plain text
    Text(String),
    /// Raw image bytes sent inline
    Image { mime_type: String, data: Vec<u8> },
}

/// Request for inference
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    /// Prompt parts in order
    pub parts: Vec<ContentPart>,
    /// Model to use (overrides config default)
    pub model: Option<String>,
    /// Maximum tokens to generate
    pub max_output_tokens: Option<u32>,
    /// Temperature for sampling
    pub temperature: Option<f32>,
}

impl InferenceRequest {
    /// Create a text-only request
    pub fn simple(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![ContentPart::Text(prompt.into())],
            model: None,
            max_output_tokens: None,
            temperature: None,
        }
    }

    /// Create a request with a text prompt followed by an image
    pub fn with_image(
        prompt: impl Into<String>,
        mime_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            parts: vec![
                ContentPart::Text(prompt.into()),
                ContentPart::Image {
                    mime_type: mime_type.into(),
                    data,
                },
            ],
            model: None,
            max_output_tokens: None,
            temperature: None,
        }
    }

    /// Set the model for this request
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set temperature
    #[must_use]
    pub const fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Whether any part is an image
    pub fn has_image(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, ContentPart::Image { .. }))
    }
}

/// Response from inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResponse {
    /// Generated content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Port for inference engine implementations
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Generate a complete response
    async fn generate(&self, request: InferenceRequest)
    -> Result<InferenceResponse, InferenceError>;

    /// Check if the inference server is reachable and accepts our key
    async fn health_check(&self) -> Result<bool, InferenceError>;

    /// Get the current default model
    fn default_model(&self) -> &str;
}
