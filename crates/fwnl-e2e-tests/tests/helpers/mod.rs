//! Shared harness for end-to-end scenarios.
//!
//! Drives the assistant both in-process and through the real Axum router,
//! so the same dialogue can be checked on every delivery path.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use fwnl_core::{Assistant, RuleEngine, Session};
use fwnl_server::routes::build_router;
use fwnl_server::state::AppState;

/// Request that opens the access-control dialogue.
pub const ACL_REQUEST: &str = "I want to block ftp traffic from the lab";

/// Answers for the ACL slots, in slot order.
pub const ACL_ANSWERS: [&str; 5] = ["myrule", "10.0.0.0/24", "server", "ftp", "before"];

/// Assistant over the built-in rule engine.
pub fn assistant() -> Assistant {
    Assistant::new(Arc::new(RuleEngine::new()))
}

/// Feed `messages` in order and collect every reply.
pub fn converse(assistant: &Assistant, session: &mut Session, messages: &[&str]) -> Vec<String> {
    messages
        .iter()
        .flat_map(|m| assistant.handle(m, session))
        .collect()
}

pub struct TestHarness {
    pub state: AppState,
    pub router: Router,
}

impl TestHarness {
    pub fn new() -> Self {
        let state = AppState::new("FwBot E2E");
        let router = build_router(state.clone());
        Self { state, router }
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
    }

    /// POST /bot with an optional snapshot.
    pub async fn bot(&self, text: &str, user_data: &Value) -> (StatusCode, Value) {
        self.post("/bot", json!({"text": text, "user_data": user_data}))
            .await
    }

    /// Run a whole stateless conversation, threading `user_data` through.
    /// Returns the replies of the last turn and the last snapshot.
    pub async fn bot_conversation(&self, messages: &[&str]) -> (Vec<String>, Value) {
        let mut user_data = Value::Null;
        let mut last = Vec::new();
        for message in messages {
            let (status, json) = self.bot(message, &user_data).await;
            assert_eq!(status, StatusCode::OK, "turn {message:?} failed: {json}");
            user_data = json["user_data"].clone();
            last = json["responses"]
                .as_array()
                .unwrap()
                .iter()
                .map(|r| r.as_str().unwrap().to_string())
                .collect();
        }
        (last, user_data)
    }

    /// POST /api/v1/sessions/{id}/messages.
    pub async fn message(&self, session: &str, text: &str) -> (StatusCode, Value) {
        self.post(
            &format!("/api/v1/sessions/{session}/messages"),
            json!({"text": text}),
        )
        .await
    }

    /// POST /api/v1/sessions/{id}/skip.
    pub async fn skip(&self, session: &str) -> (StatusCode, Value) {
        self.call(
            Request::post(format!("/api/v1/sessions/{session}/skip"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// DELETE /api/v1/sessions/{id}.
    pub async fn delete(&self, session: &str) -> (StatusCode, Value) {
        self.call(
            Request::delete(format!("/api/v1/sessions/{session}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}
