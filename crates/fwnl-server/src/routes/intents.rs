//! Template catalogue.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct IntentInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub slots: Vec<&'static str>,
}

/// GET /api/v1/intents — templates the assistant can fill in.
pub async fn list_intents(State(state): State<AppState>) -> Json<Vec<IntentInfo>> {
    let intents = state
        .assistant
        .templates()
        .iter()
        .map(|kind| IntentInfo {
            label: kind.label(),
            description: kind.description(),
            slots: kind.slots().iter().map(|s| s.name()).collect(),
        })
        .collect();
    Json(intents)
}
