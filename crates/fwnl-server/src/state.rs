//! Shared application state for the Axum server.

use std::collections::HashMap;
use std::sync::Arc;

use fwnl_core::{Assistant, LanguageEngine, RuleEngine, Session};
use tokio::sync::{Mutex, RwLock};

/// One conversation, locked for the duration of a turn.
pub type SharedSession = Arc<Mutex<Session>>;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Dialogue driver shared by all conversations.
    pub assistant: Arc<Assistant>,
    /// Live conversations of the chat API, keyed by client-chosen id.
    pub sessions: Arc<RwLock<HashMap<String, SharedSession>>>,
    /// Bot name reported by `/health`.
    pub nickname: String,
}

impl AppState {
    /// State backed by the built-in rule engine.
    pub fn new(nickname: impl Into<String>) -> Self {
        Self::with_engine(Arc::new(RuleEngine::new()), nickname)
    }

    pub fn with_engine(engine: Arc<dyn LanguageEngine>, nickname: impl Into<String>) -> Self {
        Self {
            assistant: Arc::new(Assistant::new(engine)),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            nickname: nickname.into(),
        }
    }

    /// Existing session for `id`, created if absent.
    pub async fn session(&self, id: &str) -> SharedSession {
        if let Some(session) = self.sessions.read().await.get(id) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(id.to_string()).or_insert_with(|| {
            tracing::debug!(session_id = %id, "session created");
            Arc::new(Mutex::new(Session::new()))
        }))
    }

    /// Existing session for `id`, if any.
    pub async fn existing_session(&self, id: &str) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Forget `id` if it still maps to `shared` and that session is idle.
    /// A finished or declined conversation is recreated on the next message.
    /// Callers must drop their own guard on `shared` first.
    pub async fn release_if_idle(&self, id: &str, shared: &SharedSession) -> bool {
        let mut sessions = self.sessions.write().await;
        let idle = match sessions.get(id) {
            // A session locked by another turn is in use, not idle.
            Some(current) if Arc::ptr_eq(current, shared) => current
                .try_lock()
                .is_ok_and(|session| session.is_idle()),
            _ => false,
        };
        if idle {
            sessions.remove(id);
            tracing::debug!(session_id = %id, "idle session released");
        }
        idle
    }

    /// Forget the session for `id`. Returns whether it existed.
    pub async fn remove_session(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn session_is_created_once() {
        let state = AppState::new("test");
        let a = state.session("alice").await;
        let b = state.session("alice").await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(state.sessions.read().await.len(), 1);
    }

    #[tokio::test]
    async fn release_only_idle_sessions() {
        let state = AppState::new("test");
        let shared = state.session("carol").await;
        state.assistant.handle("block ftp", &mut *shared.lock().await);
        assert!(!state.release_if_idle("carol", &shared).await);
        assert!(state.existing_session("carol").await.is_some());

        state.assistant.handle("no", &mut *shared.lock().await);
        assert!(state.release_if_idle("carol", &shared).await);
        assert!(state.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn release_ignores_replaced_entry() {
        let state = AppState::new("test");
        let stale = state.session("dave").await;
        state.remove_session("dave").await;
        state.session("dave").await;
        assert!(!state.release_if_idle("dave", &stale).await);
        assert_eq!(state.sessions.read().await.len(), 1);
    }

    #[tokio::test]
    async fn existing_and_remove() {
        let state = AppState::new("test");
        assert!(state.existing_session("bob").await.is_none());
        state.session("bob").await;
        assert!(state.existing_session("bob").await.is_some());
        assert!(state.remove_session("bob").await);
        assert!(!state.remove_session("bob").await);
    }
}
