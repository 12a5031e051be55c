//! API route definitions and router builder.

pub mod bot;
pub mod health;
pub mod intents;
pub mod page;
pub mod sessions;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/intents", get(intents::list_intents))
        .route("/sessions/{id}/messages", post(sessions::post_message))
        .route("/sessions/{id}/skip", post(sessions::skip))
        .route("/sessions/{id}", delete(sessions::delete_session));

    Router::new()
        .route("/", get(page::index))
        .route("/health", get(health::health))
        .route("/bot", post(bot::bot))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState::new("FwBot Test"))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    // ── health / intents ────────────────────────────────────────

    #[tokio::test]
    async fn health_returns_ok() {
        let (status, json) = send(
            app(),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["nickname"], "FwBot Test");
    }

    #[tokio::test]
    async fn index_serves_chat_page() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()["content-type"]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(body.to_vec()).unwrap();
        assert!(page.contains("fetch('/bot'"));
        assert!(page.contains("localStorage"));
    }

    #[tokio::test]
    async fn list_intents() {
        let (status, json) = send(
            app(),
            Request::get("/api/v1/intents").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["label"], "ACL");
        assert_eq!(json[1]["label"], "TS");
        assert_eq!(
            json[0]["slots"],
            json!(["Name", "From", "To", "Block", "Order"])
        );
    }

    // ── /bot ────────────────────────────────────────────────────

    #[tokio::test]
    async fn bot_without_user_data_starts_dialogue() {
        let (status, json) = send(
            app(),
            post_json("/bot", &json!({"text": "Block FTP from the lab"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["responses"],
            json!(["Do you want to make ACL (i.e., Access Control List)?"])
        );
        assert_eq!(json["user_data"]["_data"]["0"], "confirm_intent");
        assert_eq!(json["user_data"]["_data"]["1"]["label"], "ACL");
    }

    #[tokio::test]
    async fn bot_round_trips_user_data() {
        let router = app();
        let (_, first) = send(
            router.clone(),
            post_json("/bot", &json!({"text": "block ftp", "user_data": null})),
        )
        .await;
        let (status, second) = send(
            router,
            post_json(
                "/bot",
                &json!({"text": "yes", "user_data": first["user_data"]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["user_data"]["_data"]["0"], "questions");
        assert_eq!(second["user_data"]["_data"]["3"], 0);
        assert_eq!(second["responses"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn bot_rejects_bad_user_data() {
        let (status, json) = send(
            app(),
            post_json(
                "/bot",
                &json!({"text": "yes", "user_data": {"_data": {"1": {"label": "NAT", "commands": []}}}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], 400);
    }

    // ── sessions ────────────────────────────────────────────────

    #[tokio::test]
    async fn session_messages_keep_state() {
        let router = app();
        let (status, json) = send(
            router.clone(),
            post_json("/api/v1/sessions/s1/messages", &json!({"text": "block ftp"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["session_id"], "s1");
        assert_eq!(json["state"], "confirm_intent");

        let (_, json) = send(
            router.clone(),
            post_json("/api/v1/sessions/s1/messages", &json!({"text": "yes"})),
        )
        .await;
        assert_eq!(json["state"], "questions");

        let (_, json) = send(
            router,
            post_json("/api/v1/sessions/s1/skip", &json!({})),
        )
        .await;
        assert_eq!(json["state"], "questions");
        assert!(json["responses"][0].as_str().unwrap().contains("property From"));
    }

    #[tokio::test]
    async fn declined_session_is_released() {
        let state = AppState::new("FwBot Test");
        let router = build_router(state.clone());
        send(
            router.clone(),
            post_json("/api/v1/sessions/s3/messages", &json!({"text": "block ftp"})),
        )
        .await;
        assert_eq!(state.sessions.read().await.len(), 1);

        let (status, json) = send(
            router,
            post_json("/api/v1/sessions/s3/messages", &json!({"text": "no"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], Value::Null);
        assert!(state.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn skip_unknown_session_is_not_found() {
        let (status, _) = send(
            app(),
            Request::post("/api/v1/sessions/ghost/skip")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_session_cancels() {
        let router = app();
        send(
            router.clone(),
            post_json("/api/v1/sessions/s2/messages", &json!({"text": "limit traffic"})),
        )
        .await;
        let (status, json) = send(
            router.clone(),
            Request::delete("/api/v1/sessions/s2")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["responses"], json!(["Ok, cancelled."]));
        assert_eq!(json["state"], Value::Null);

        let (status, _) = send(
            router,
            Request::delete("/api/v1/sessions/s2")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
