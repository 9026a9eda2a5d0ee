use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::export_filename;
use crate::preview::{render, to_html};
use crate::state::AppState;

/// GET /api/v1/sessions/:id/export
///
/// Renders the preview page and returns it as a PDF attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let exporter = state.exporter.clone().ok_or_else(|| {
        AppError::ServiceUnavailable("PDF export is not configured (RENDER_SERVICE_URL)".to_string())
    })?;
    let session = state.sessions.get(id).await?;

    let (html, filename) = {
        let session = session.lock().await;
        (
            to_html(&render(&session.resume)),
            export_filename(&session.resume.full_name),
        )
    };

    let pdf = exporter.export(&html).await?;
    info!("Session {id}: exported {filename} ({} bytes)", pdf.len());

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid export file name: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}
