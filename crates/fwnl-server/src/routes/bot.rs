//! Stateless chat endpoint. The client carries the session snapshot.

use axum::Json;
use axum::extract::State;
use fwnl_core::{Session, snapshot};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for one stateless turn.
#[derive(Debug, Deserialize)]
pub struct BotRequest {
    /// What the user typed.
    pub text: String,
    /// Snapshot returned by the previous turn; absent or null starts over.
    #[serde(default)]
    pub user_data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct BotResponse {
    /// Snapshot to send back with the next turn.
    pub user_data: serde_json::Value,
    pub responses: Vec<String>,
}

/// POST /bot — run one turn against the client's snapshot.
pub async fn bot(
    State(state): State<AppState>,
    Json(req): Json<BotRequest>,
) -> ApiResult<Json<BotResponse>> {
    let mut session = match req.user_data {
        None => Session::new(),
        Some(data) => snapshot::decode_value(data)?,
    };
    let responses = state.assistant.handle(&req.text, &mut session);
    tracing::debug!(state = ?session.state, replies = responses.len(), "bot turn");
    Ok(Json(BotResponse {
        user_data: snapshot::encode(&session),
        responses,
    }))
}
