//! In-memory table of active quiz sessions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::quiz::session::QuizSession;
use crate::quiz::{ParticipantId, Question};

/// Shared handle to one participant's session. The controller locks it for
/// the whole look-up → submit → reply sequence, so events for the same
/// participant are handled strictly one at a time while unrelated
/// participants stay independent.
pub type SessionHandle = Arc<Mutex<QuizSession>>;

/// Maps each participant to at most one active session.
///
/// The table lock is only held for map operations; it is never held while a
/// session itself is locked.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<ParticipantId, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh session for `participant`, silently replacing any
    /// session still in flight for the same participant.
    pub async fn create(&self, participant: ParticipantId, questions: Vec<Question>) -> SessionHandle {
        let session = Arc::new(Mutex::new(QuizSession::new(questions)));
        let mut sessions = self.sessions.write().await;
        sessions.insert(participant, session.clone());
        session
    }

    pub async fn get(&self, participant: ParticipantId) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions.get(&participant).cloned()
    }

    pub async fn remove(&self, participant: ParticipantId) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&participant);
    }
}
