//! Assistant flows: transition the session, release the lock for the
//! completion call, then record the outcome.

use tracing::{info, warn};

use crate::assistant::session::AssistantError;
use crate::llm_client::{CompletionClient, CompletionRequest};
use crate::session::SharedSession;

pub async fn send_user_message(
    session: &SharedSession,
    llm: &dyn CompletionClient,
    text: &str,
) -> Result<(), AssistantError> {
    let request = session.lock().await.assistant.begin_user_message(text)?;
    finish(session, llm, request).await;
    Ok(())
}

/// Sends a snapshot of the resume as it is when the request starts. Edits
/// made while waiting are not part of the review.
pub async fn request_feedback(
    session: &SharedSession,
    llm: &dyn CompletionClient,
) -> Result<(), AssistantError> {
    let request = {
        let mut guard = session.lock().await;
        let current = &mut *guard;
        current.assistant.begin_feedback(&current.resume)?
    };
    finish(session, llm, request).await;
    Ok(())
}

pub async fn analyze_uploaded_file(
    session: &SharedSession,
    llm: &dyn CompletionClient,
) -> Result<(), AssistantError> {
    let request = session.lock().await.assistant.begin_file_analysis()?;
    match request {
        Some(request) => finish(session, llm, request).await,
        None => info!("File analysis requested with no file selected"),
    }
    Ok(())
}

async fn finish(session: &SharedSession, llm: &dyn CompletionClient, request: CompletionRequest) {
    let outcome = llm.generate(&request).await;
    match &outcome {
        Ok(reply) => info!("Assistant replied ({} chars)", reply.len()),
        Err(e) => warn!("Assistant request failed: {e}"),
    }
    session.lock().await.assistant.complete(outcome);
}
