//! Text-to-speech handler

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Query parameters of the speech endpoint
#[derive(Debug, Deserialize)]
pub struct TtsQuery {
    pub text: String,
}

/// Speak `text` and return it as a downloadable audio file
///
/// Thai script selects a Thai voice, anything else is read in English.
#[instrument(skip(state, query), fields(text_len = query.text.len()))]
pub async fn text_to_speech(
    State(state): State<AppState>,
    Query(query): Query<TtsQuery>,
) -> Result<Response, ApiError> {
    let audio = state
        .flashcards
        .speak(&query.text)
        .await
        .map_err(|e| ApiError::from(e).context("Error generating speech"))?;

    let disposition = format!("attachment; filename=tts.{}", audio.extension);
    Ok((
        [
            (header::CONTENT_TYPE, audio.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        audio.data,
    )
        .into_response())
}
