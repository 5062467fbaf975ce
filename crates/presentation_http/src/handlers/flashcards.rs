//! Flashcard CRUD handlers

use axum::{
    Json,
    extract::{Path, State},
};
use domain::{Card, CardId, CardPatch, NewCard};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Confirmation returned after a delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// List every stored card
#[instrument(skip(state))]
pub async fn list_flashcards(State(state): State<AppState>) -> Json<Vec<Card>> {
    Json(state.flashcards.list().await)
}

/// Store a card built by the client
#[instrument(skip(state, card))]
pub async fn create_flashcard(
    State(state): State<AppState>,
    Json(card): Json<NewCard>,
) -> Json<Card> {
    Json(state.flashcards.create(card).await)
}

/// Get one card
#[instrument(skip(state))]
pub async fn get_flashcard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    state
        .flashcards
        .get(&CardId::from(id))
        .await
        .map(Json)
        .ok_or_else(ApiError::card_not_found)
}

/// Partially update a card; absent or null fields are left unchanged
#[instrument(skip(state, patch))]
pub async fn update_flashcard(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CardPatch>,
) -> Result<Json<Card>, ApiError> {
    state
        .flashcards
        .update(&CardId::from(id), patch)
        .await
        .map(Json)
        .ok_or_else(ApiError::card_not_found)
}

/// Delete a card
#[instrument(skip(state))]
pub async fn delete_flashcard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if state.flashcards.delete(&CardId::from(id)).await {
        Ok(Json(MessageResponse {
            message: "Flashcard deleted successfully".to_string(),
        }))
    } else {
        Err(ApiError::card_not_found())
    }
}
