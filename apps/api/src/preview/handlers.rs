use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::preview::{render, to_html, PreviewDocument};
use crate::state::AppState;

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewDocument>, AppError> {
    let session = state.sessions.get(id).await?;
    let doc = render(&session.lock().await.resume);
    Ok(Json(doc))
}

/// GET /api/v1/sessions/:id/preview.html
pub async fn handle_preview_html(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let session = state.sessions.get(id).await?;
    let doc = render(&session.lock().await.resume);
    Ok(Html(to_html(&doc)))
}
