//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
///
/// The request body limit comes from `server.max_body_size_bytes` so image
/// uploads larger than axum's default are accepted.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_bytes;

    Router::new()
        // Status endpoints
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Generation
        .route(
            "/generate-flashcard/",
            post(handlers::generate::generate_flashcard),
        )
        .route(
            "/generate-flashcard-from-image/",
            post(handlers::generate::generate_flashcard_from_image),
        )
        // Card CRUD
        .route(
            "/flashcards/",
            get(handlers::flashcards::list_flashcards).post(handlers::flashcards::create_flashcard),
        )
        .route(
            "/flashcards/{id}",
            get(handlers::flashcards::get_flashcard)
                .put(handlers::flashcards::update_flashcard)
                .delete(handlers::flashcards::delete_flashcard),
        )
        // Speech
        .route("/tts/", get(handlers::tts::text_to_speech))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
