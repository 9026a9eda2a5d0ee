use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::assistant::session::AssistantSession;
use crate::errors::AppError;
use crate::models::resume::ResumeRecord;

/// Everything one user builds: the resume, how many times it has been
/// replaced, and the assistant conversation about it.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub resume: ResumeRecord,
    /// Bumped on every record replacement. Observers compare revisions
    /// rather than record contents.
    pub revision: u64,
    pub assistant: AssistantSession,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            resume: ResumeRecord::default(),
            revision: 0,
            assistant: AssistantSession::new(),
            created_at: Utc::now(),
        }
    }

    pub fn replace_resume(&mut self, next: ResumeRecord) {
        self.resume = next;
        self.revision += 1;
    }
}

pub type SharedSession = Arc<Mutex<Session>>;

/// Owner of every live session. Sessions are in-memory only and end when
/// removed.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new(id)));
        self.sessions.write().await.insert(id, session.clone());
        info!("Session {id} created");
        (id, session)
    }

    pub async fn get(&self, id: Uuid) -> Result<SharedSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                info!("Session {id} ended");
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Session {id} not found"))),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
