//! Flashcard generation handlers

use axum::{
    Json,
    extract::{Multipart, Query, State},
};
use domain::{Card, CardContent, Language};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

/// Multipart field carrying the uploaded image
const IMAGE_FIELD: &str = "file";

/// Content type assumed when the upload does not declare one
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Text generation request body
#[derive(Debug, Deserialize)]
pub struct GenerateFlashcardRequest {
    /// Word or phrase to translate
    pub text: String,
    #[serde(default = "Language::english")]
    pub source_language: Language,
    #[serde(default = "Language::thai")]
    pub target_language: Language,
}

/// Generate card content for a word or phrase; nothing is stored
#[instrument(skip(state, request), fields(text_len = request.text.len()))]
pub async fn generate_flashcard(
    State(state): State<AppState>,
    Json(request): Json<GenerateFlashcardRequest>,
) -> Result<Json<CardContent>, ApiError> {
    let content = state
        .flashcards
        .generate(
            &request.text,
            &request.source_language,
            &request.target_language,
        )
        .await
        .map_err(|e| ApiError::from(e).context("Error generating flashcard"))?;

    Ok(Json(content))
}

/// Query parameters of the image endpoint
#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    #[serde(default = "Language::thai")]
    pub target_language: Language,
}

/// Uploaded image bytes and their declared type
#[derive(Debug)]
struct Upload {
    data: Vec<u8>,
    mime_type: String,
}

async fn read_image(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let mime_type = field
            .content_type()
            .filter(|ct| ct.starts_with("image/"))
            .unwrap_or(DEFAULT_IMAGE_MIME)
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;

        return Ok(Upload {
            data: data.to_vec(),
            mime_type,
        });
    }

    Err(ApiError::BadRequest(format!(
        "Missing multipart field '{IMAGE_FIELD}'"
    )))
}

/// Analyze an uploaded image and store the resulting card
#[instrument(skip(state, query, multipart), fields(target = %query.target_language))]
pub async fn generate_flashcard_from_image(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
    mut multipart: Multipart,
) -> Result<Json<Card>, ApiError> {
    let upload = read_image(&mut multipart).await?;
    debug!(bytes = upload.data.len(), mime_type = %upload.mime_type, "Image received");

    let card = state
        .flashcards
        .create_from_image(&upload.data, &upload.mime_type, &query.target_language)
        .await
        .map_err(|e| ApiError::from(e).context("Error processing image"))?;

    Ok(Json(card))
}
