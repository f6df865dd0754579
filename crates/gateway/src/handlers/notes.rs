//! Note handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use validator::Validate;

use super::invalid_body;
use crate::AppState;
use admission_common::{
    api::{CreateNoteRequest, CreateNoteResponse, NoteView},
    db::models::Note,
    errors::Result,
    metrics,
};

/// List every note in insertion order
#[instrument(skip(state))]
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<NoteView>>> {
    let notes = state.repo.list_notes().await?;

    Ok(Json(notes.into_iter().map(NoteView::from).collect()))
}

/// Store a note stamped with the server clock
#[instrument(skip(state, payload))]
pub async fn create_note(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateNoteResponse>)> {
    let Json(request) = payload.map_err(invalid_body)?;
    request.validate()?;

    let note = Note::new(
        request.title.unwrap_or_default(),
        request.content.unwrap_or_default(),
        request.uploader_email.unwrap_or_default(),
    );

    let inserted_id = state.repo.insert_note(note).await?;
    metrics::record_note_created();

    tracing::info!(note_id = %inserted_id, "Note uploaded");

    Ok((
        StatusCode::CREATED,
        Json(CreateNoteResponse {
            message: "Note uploaded successfully".to_string(),
            inserted_id: inserted_id.to_hex(),
        }),
    ))
}

/// Notes whose uploader email matches exactly
#[instrument(skip(state))]
pub async fn list_notes_by_uploader(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<NoteView>>> {
    let notes = state.repo.list_notes_by_uploader(&email).await?;

    Ok(Json(notes.into_iter().map(NoteView::from).collect()))
}
