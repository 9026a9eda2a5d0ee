use std::sync::Arc;

use crate::export::Exporter;
use crate::llm_client::CompletionClient;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Completion backend for the assistant. Gemini in production, a stub in tests.
    pub llm: Arc<dyn CompletionClient>,
    /// Document renderer for PDF export. `None` when RENDER_SERVICE_URL is unset.
    pub exporter: Option<Arc<dyn Exporter>>,
}
