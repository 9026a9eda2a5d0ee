//! Assistant state machine: `Idle -> Waiting -> Idle`.
//!
//! Each `begin_*` call validates its precondition, appends the user-side
//! transcript entry and hands back the `CompletionRequest` to send. The caller
//! performs the request without holding the session lock and reports the
//! outcome through `complete`, which appends exactly one assistant entry and
//! returns the session to `Idle`.
//!
//! A `begin_*` call while `Waiting` is rejected with `AssistantError::Busy`
//! and leaves the transcript untouched.

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use crate::assistant::prompts::{
    career_advice_prompt, file_review_text, resume_feedback_prompt, FEEDBACK_REQUEST_TEXT,
    FILE_REVIEW_PROMPT, NO_FILE_SELECTED_TEXT,
};
use crate::assistant::transcript::{ChatTranscript, Role};
use crate::llm_client::{CompletionRequest, InlineAttachment, LlmError};
use crate::models::resume::ResumeRecord;

const WORD_DOC_MIME: &str = "application/msword";
const WORD_DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
    #[error("The assistant is still answering the previous request")]
    Busy,

    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Unsupported file type '{0}'. Upload an image, PDF, or Word document")]
    UnsupportedFileType(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantState {
    Idle,
    Waiting,
}

/// The resume file selected for analysis. Kept after analysis until replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

/// Image, PDF, or Word document.
pub fn is_accepted_mime_type(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
        || mime_type == "application/pdf"
        || mime_type == WORD_DOC_MIME
        || mime_type == WORD_DOCX_MIME
}

#[derive(Debug, Clone)]
pub struct AssistantSession {
    transcript: ChatTranscript,
    state: AssistantState,
    uploaded_file: Option<UploadedFile>,
}

impl Default for AssistantSession {
    fn default() -> Self {
        Self {
            transcript: ChatTranscript::new(),
            state: AssistantState::Idle,
            uploaded_file: None,
        }
    }
}

impl AssistantSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    pub fn state(&self) -> AssistantState {
        self.state
    }

    pub fn uploaded_file(&self) -> Option<&UploadedFile> {
        self.uploaded_file.as_ref()
    }

    /// Selects the file for the next analysis, replacing any previous one.
    pub fn select_file(&mut self, file: UploadedFile) -> Result<(), AssistantError> {
        if !is_accepted_mime_type(&file.mime_type) {
            return Err(AssistantError::UnsupportedFileType(file.mime_type));
        }
        self.uploaded_file = Some(file);
        Ok(())
    }

    /// Blank or whitespace-only text is rejected before the transcript is touched.
    pub fn begin_user_message(&mut self, text: &str) -> Result<CompletionRequest, AssistantError> {
        self.ensure_idle()?;
        if text.trim().is_empty() {
            return Err(AssistantError::EmptyMessage);
        }
        self.transcript.push(Role::User, text);
        self.state = AssistantState::Waiting;
        Ok(CompletionRequest::text(career_advice_prompt(text)))
    }

    pub fn begin_feedback(
        &mut self,
        record: &ResumeRecord,
    ) -> Result<CompletionRequest, AssistantError> {
        self.ensure_idle()?;
        let prompt = resume_feedback_prompt(record);
        self.transcript.push(Role::User, FEEDBACK_REQUEST_TEXT);
        self.state = AssistantState::Waiting;
        Ok(CompletionRequest::text(prompt))
    }

    /// `Ok(None)` when no file is selected: an assistant entry asks for an
    /// upload and nothing is sent.
    pub fn begin_file_analysis(&mut self) -> Result<Option<CompletionRequest>, AssistantError> {
        self.ensure_idle()?;
        let Some(file) = &self.uploaded_file else {
            self.transcript.push(Role::Assistant, NO_FILE_SELECTED_TEXT);
            return Ok(None);
        };
        let attachment = InlineAttachment {
            mime_type: file.mime_type.clone(),
            data: STANDARD.encode(&file.bytes),
        };
        let entry = file_review_text(&file.name);
        self.transcript.push(Role::User, entry);
        self.state = AssistantState::Waiting;
        Ok(Some(CompletionRequest::with_attachment(
            FILE_REVIEW_PROMPT,
            attachment,
        )))
    }

    /// Records the outcome of the outstanding request and returns to `Idle`.
    pub fn complete(&mut self, outcome: Result<String, LlmError>) {
        let text = match outcome {
            Ok(reply) => reply,
            Err(LlmError::MissingCredential) => LlmError::MissingCredential.to_string(),
            Err(e) => format!("Error: {e}"),
        };
        self.transcript.push(Role::Assistant, text);
        self.state = AssistantState::Idle;
    }

    fn ensure_idle(&self) -> Result<(), AssistantError> {
        match self.state {
            AssistantState::Idle => Ok(()),
            AssistantState::Waiting => Err(AssistantError::Busy),
        }
    }
}
