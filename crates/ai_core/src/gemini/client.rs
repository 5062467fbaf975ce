//! Gemini REST client implementation

use std::{fmt, time::Duration};

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{ContentPart, InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Inference engine backed by the Gemini API
pub struct GeminiInferenceEngine {
    client: Client,
    config: InferenceConfig,
    api_key: SecretString,
}

impl fmt::Debug for GeminiInferenceEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiInferenceEngine")
            .field("base_url", &self.config.base_url)
            .field("default_model", &self.config.default_model)
            .finish_non_exhaustive()
    }
}

impl GeminiInferenceEngine {
    /// Create a new Gemini inference engine
    ///
    /// Fails if no API key is configured.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        if !config.has_api_key() {
            return Err(InferenceError::MissingApiKey);
        }
        let api_key = config
            .api_key
            .clone()
            .ok_or(InferenceError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            vision_model = %config.vision_model,
            "Initialized Gemini inference engine"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// URL for a model-scoped endpoint, e.g. `:generateContent`
    fn model_url(&self, model: &str, action: &str) -> String {
        format!(
            "{}/models/{}{}",
            self.config.base_url.trim_end_matches('/'),
            model,
            action
        )
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        match request.model.as_deref() {
            Some(model) => model,
            None if request.has_image() => &self.config.vision_model,
            None => &self.config.default_model,
        }
    }

    fn build_body(&self, request: &InferenceRequest) -> GenerateContentRequest {
        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => GeminiPart::Text { text: text.clone() },
                ContentPart::Image { mime_type, data } => GeminiPart::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.clone(),
                        data: BASE64.encode(data),
                    },
                },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts,
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature.unwrap_or(self.config.temperature),
                max_output_tokens: request
                    .max_output_tokens
                    .unwrap_or(self.config.max_output_tokens),
            },
        }
    }
}

/// Gemini `generateContent` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Gemini `generateContent` response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

fn status_error(status: StatusCode, body: String) -> InferenceError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimited,
        s if s.is_server_error() => InferenceError::ServerError(format!("Status {s}: {body}")),
        s => InferenceError::RequestFailed(format!("Status {s}: {body}")),
    }
}

#[async_trait]
impl InferenceEngine for GeminiInferenceEngine {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request), parts = request.parts.len()))]
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let model = self.resolve_model(&request).to_string();
        let body = self.build_body(&request);

        debug!("Sending request to Gemini");

        let response = self
            .client
            .post(self.model_url(&model, ":generateContent"))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Inference request failed");
            return Err(status_error(status, body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let Some(candidate) = parsed.candidates.into_iter().next() else {
            let reason = parsed
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(InferenceError::Blocked(reason));
        };

        let content: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(InferenceError::Blocked(
                candidate
                    .finish_reason
                    .unwrap_or_else(|| "empty candidate".to_string()),
            ));
        }

        let usage = parsed.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        debug!(tokens = ?usage, "Inference completed");

        Ok(InferenceResponse {
            content,
            model: parsed.model_version.unwrap_or(model),
            usage,
            finish_reason: candidate.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        let response = self
            .client
            .get(self.model_url(&self.config.default_model, ""))
            .header(API_KEY_HEADER, self.api_key.expose_secret())
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() || e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.to_string())),
        }
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
