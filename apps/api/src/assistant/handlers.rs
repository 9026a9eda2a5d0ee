//! Axum route handlers for the Assistant API.

use std::future::Future;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::assistant::markdown::render_markdown;
use crate::assistant::service;
use crate::assistant::session::{AssistantError, AssistantSession, AssistantState, UploadedFile};
use crate::assistant::transcript::{Role, TranscriptEntry};
use crate::errors::AppError;
use crate::session::SharedSession;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptEntryView {
    pub role: Role,
    pub text: String,
    /// Markdown rendered to HTML. Assistant entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub at: DateTime<Utc>,
}

impl From<&TranscriptEntry> for TranscriptEntryView {
    fn from(entry: &TranscriptEntry) -> Self {
        Self {
            role: entry.role,
            text: entry.text.clone(),
            html: (entry.role == Role::Assistant).then(|| render_markdown(&entry.text)),
            at: entry.at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SelectedFileView {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

#[derive(Debug, Serialize)]
pub struct AssistantView {
    pub state: AssistantState,
    pub selected_file: Option<SelectedFileView>,
    pub transcript: Vec<TranscriptEntryView>,
}

impl AssistantView {
    pub fn from_session(assistant: &AssistantSession) -> Self {
        Self {
            state: assistant.state(),
            selected_file: assistant.uploaded_file().map(|f| SelectedFileView {
                name: f.name.clone(),
                mime_type: f.mime_type.clone(),
                size_bytes: f.bytes.len(),
            }),
            transcript: assistant
                .transcript()
                .entries()
                .iter()
                .map(TranscriptEntryView::from)
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/assistant
pub async fn handle_get_assistant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssistantView>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(view(&session).await))
}

/// POST /api/v1/sessions/:id/assistant/messages
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<AssistantView>, AppError> {
    let session = state.sessions.get(id).await?;
    let (shared, llm) = (session.clone(), state.llm.clone());
    detached(async move { service::send_user_message(&shared, llm.as_ref(), &request.text).await })
        .await?;
    Ok(Json(view(&session).await))
}

/// POST /api/v1/sessions/:id/assistant/feedback
///
/// Reviews the resume built in this session, section by section.
pub async fn handle_request_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssistantView>, AppError> {
    let session = state.sessions.get(id).await?;
    let (shared, llm) = (session.clone(), state.llm.clone());
    detached(async move { service::request_feedback(&shared, llm.as_ref()).await }).await?;
    Ok(Json(view(&session).await))
}

/// POST /api/v1/sessions/:id/assistant/upload
///
/// Multipart body with one `file` part. Selects the file for analysis.
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<AssistantView>, AppError> {
    let session = state.sessions.get(id).await?;

    let mut uploaded = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field
            .content_type()
            .map(str::to_string)
            .filter(|m| m != "application/octet-stream")
            .or_else(|| guess_mime_type(&name).map(str::to_string))
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
        uploaded = Some(UploadedFile {
            name,
            mime_type,
            bytes,
        });
        break;
    }

    let file = uploaded
        .ok_or_else(|| AppError::Validation("Multipart body has no 'file' part".to_string()))?;
    info!(
        "Session {id}: selected {} ({}, {} bytes)",
        file.name,
        file.mime_type,
        file.bytes.len()
    );
    session.lock().await.assistant.select_file(file)?;

    Ok(Json(view(&session).await))
}

/// POST /api/v1/sessions/:id/assistant/analyze
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssistantView>, AppError> {
    let session = state.sessions.get(id).await?;
    let (shared, llm) = (session.clone(), state.llm.clone());
    detached(async move { service::analyze_uploaded_file(&shared, llm.as_ref()).await }).await?;
    Ok(Json(view(&session).await))
}

/// Runs an assistant flow on its own task. A client that disconnects mid-request
/// drops the handler future, and the flow must still leave the `waiting` state.
async fn detached<F>(flow: F) -> Result<(), AppError>
where
    F: Future<Output = Result<(), AssistantError>> + Send + 'static,
{
    tokio::spawn(flow)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Assistant task failed: {e}")))??;
    Ok(())
}

async fn view(session: &SharedSession) -> AssistantView {
    AssistantView::from_session(&session.lock().await.assistant)
}

/// Fallback when the client sends no usable content type.
fn guess_mime_type(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "doc" => Some("application/msword"),
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
