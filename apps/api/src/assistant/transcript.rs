use chrono::{DateTime, Utc};
use serde::Serialize;

pub const GREETING: &str = "Hello! Ask a question, get feedback on the resume you build here, or upload your own for analysis.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Append-only chat history. Starts with the assistant greeting.
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    entries: Vec<TranscriptEntry>,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        let mut transcript = Self {
            entries: Vec::new(),
        };
        transcript.push(Role::Assistant, GREETING);
        transcript
    }
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            role,
            text: text.into(),
            at: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}
