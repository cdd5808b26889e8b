use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use sn_core::{Error, GenerationResult, Mode, NoteDraft, NOTE_NOT_FOUND};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::owner::OwnerId;
use crate::AppState;

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct ArticleRequest {
    #[serde(default)]
    pub url: Option<String>,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))
}

async fn generate(
    state: &AppState,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
    modes: &[Mode],
) -> ApiResult<Json<GenerationResult>> {
    let request = body(payload)?;
    let url = request.url.unwrap_or_default();
    let result = state.pipeline.run(&url, modes).await?;
    Ok(Json(result))
}

pub async fn blog_summary(
    State(state): State<Arc<AppState>>,
    _owner: OwnerId,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> ApiResult<Json<GenerationResult>> {
    generate(&state, payload, &[Mode::Summary]).await
}

pub async fn blog_notes(
    State(state): State<Arc<AppState>>,
    _owner: OwnerId,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> ApiResult<Json<GenerationResult>> {
    generate(&state, payload, &[Mode::Notes]).await
}

pub async fn process_blog(
    State(state): State<Arc<AppState>>,
    _owner: OwnerId,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> ApiResult<Json<GenerationResult>> {
    generate(&state, payload, &Mode::ALL).await
}

pub async fn save_note(
    State(state): State<Arc<AppState>>,
    OwnerId(owner): OwnerId,
    payload: Result<Json<NoteDraft>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let note = body(payload)?.validate()?;
    let saved = state.storage.save(&owner, note).await?;
    info!(id = %saved.id, kind = %saved.note_type, "💾 Note saved");
    Ok(Json(json!({ "message": "Note saved successfully", "data": saved })))
}

pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    OwnerId(owner): OwnerId,
) -> ApiResult<Json<Value>> {
    let notes = state.storage.list(&owner).await?;
    Ok(Json(json!({ "notes": notes })))
}

/// Unparseable ids get the same answer as unknown ones.
fn note_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::NotFound(NOTE_NOT_FOUND.to_string()).into())
}

pub async fn get_note(
    State(state): State<Arc<AppState>>,
    OwnerId(owner): OwnerId,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let note = state.storage.get(&owner, note_id(&id)?).await?;
    Ok(Json(json!({ "note": note })))
}

pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    OwnerId(owner): OwnerId,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.storage.delete(&owner, note_id(&id)?).await?;
    Ok(Json(json!({ "message": "Note deleted successfully" })))
}
