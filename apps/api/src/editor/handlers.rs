//! Axum route handlers for sessions and the resume editor.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assistant::handlers::AssistantView;
use crate::editor::commands::{apply, EditCommand};
use crate::editor::schema::{form_schema, FormSchema};
use crate::errors::AppError;
use crate::models::resume::{ResumeRecord, ScalarField, Section};
use crate::session::SharedSession;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub revision: u64,
    pub resume: ResumeRecord,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub revision: u64,
    pub resume: ResumeRecord,
    pub assistant: AssistantView,
}

#[derive(Debug, Deserialize)]
pub struct FieldValue {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct EntryFieldValue {
    pub field: String,
    pub value: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/form-schema
pub async fn handle_form_schema() -> Json<FormSchema> {
    Json(form_schema())
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let (_, session) = state.sessions.create().await;
    let response = session_response(&session).await;
    (StatusCode::CREATED, Json(response))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(session_response(&session).await))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    let session = session.lock().await;
    Ok(Json(ResumeResponse {
        revision: session.revision,
        resume: session.resume.clone(),
    }))
}

/// POST /api/v1/sessions/:id/resume/commands
pub async fn handle_command(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(command): Json<EditCommand>,
) -> Result<Json<ResumeResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    run_command(&session, command).await
}

/// PATCH /api/v1/sessions/:id/resume/fields/:field
pub async fn handle_update_field(
    State(state): State<AppState>,
    Path((id, field)): Path<(Uuid, String)>,
    Json(body): Json<FieldValue>,
) -> Result<Json<ResumeResponse>, AppError> {
    let field = ScalarField::parse(&field)?;
    let session = state.sessions.get(id).await?;
    run_command(
        &session,
        EditCommand::UpdateField {
            field,
            value: body.value,
        },
    )
    .await
}

/// POST /api/v1/sessions/:id/resume/:section/entries
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, String)>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    let section = Section::parse(&section)?;
    let session = state.sessions.get(id).await?;
    let response = run_command(&session, EditCommand::AddEntry { section }).await?;
    Ok((StatusCode::CREATED, response))
}

/// PATCH /api/v1/sessions/:id/resume/:section/entries/:index
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((id, section, index)): Path<(Uuid, String, usize)>,
    Json(body): Json<EntryFieldValue>,
) -> Result<Json<ResumeResponse>, AppError> {
    let section = Section::parse(&section)?;
    let session = state.sessions.get(id).await?;
    run_command(
        &session,
        EditCommand::UpdateEntry {
            section,
            index,
            field: body.field,
            value: body.value,
        },
    )
    .await
}

/// DELETE /api/v1/sessions/:id/resume/:section/entries/:index
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((id, section, index)): Path<(Uuid, String, usize)>,
) -> Result<Json<ResumeResponse>, AppError> {
    let section = Section::parse(&section)?;
    let session = state.sessions.get(id).await?;
    run_command(&session, EditCommand::RemoveEntry { section, index }).await
}

async fn run_command(
    session: &SharedSession,
    command: EditCommand,
) -> Result<Json<ResumeResponse>, AppError> {
    let mut session = session.lock().await;
    let next = apply(&session.resume, command)?;
    session.replace_resume(next);
    Ok(Json(ResumeResponse {
        revision: session.revision,
        resume: session.resume.clone(),
    }))
}

async fn session_response(session: &SharedSession) -> SessionResponse {
    let session = session.lock().await;
    SessionResponse {
        session_id: session.id,
        created_at: session.created_at,
        revision: session.revision,
        resume: session.resume.clone(),
        assistant: AssistantView::from_session(&session.assistant),
    }
}
