//! Session-keyed chat API. The server keeps each conversation in memory.

use axum::Json;
use axum::extract::{Path, State};
use fwnl_core::Session;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Replies of one turn plus where the conversation now stands.
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub session_id: String,
    /// Dialogue state; `null` when idle.
    pub state: Option<&'static str>,
    pub responses: Vec<String>,
}

impl TurnResponse {
    fn new(session_id: String, session: &Session, responses: Vec<String>) -> Self {
        Self {
            session_id,
            state: session.state.as_wire(),
            responses,
        }
    }
}

/// POST /api/v1/sessions/{id}/messages — send a message, creating the
/// session on first contact. The session is dropped once it goes idle.
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MessageRequest>,
) -> Json<TurnResponse> {
    let shared = state.session(&id).await;
    let turn = {
        let mut session = shared.lock().await;
        let responses = state.assistant.handle(&req.text, &mut session);
        tracing::debug!(session_id = %id, state = ?session.state, "message handled");
        TurnResponse::new(id, &session, responses)
    };
    state.release_if_idle(&turn.session_id, &shared).await;
    Json(turn)
}

/// POST /api/v1/sessions/{id}/skip — accept the current slot's default.
pub async fn skip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TurnResponse>> {
    let shared = state
        .existing_session(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("session '{id}' not found")))?;
    let turn = {
        let mut session = shared.lock().await;
        let responses = state.assistant.skip(&mut session);
        TurnResponse::new(id, &session, responses)
    };
    state.release_if_idle(&turn.session_id, &shared).await;
    Ok(Json(turn))
}

/// DELETE /api/v1/sessions/{id} — cancel and forget a conversation.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TurnResponse>> {
    let shared = state
        .existing_session(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("session '{id}' not found")))?;
    let responses = {
        let mut session = shared.lock().await;
        state.assistant.cancel(&mut session)
    };
    state.remove_session(&id).await;
    tracing::info!(session_id = %id, "session deleted");
    Ok(Json(TurnResponse {
        session_id: id,
        state: None,
        responses,
    }))
}
