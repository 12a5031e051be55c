//! Browser chat page.

use axum::response::Html;

const INDEX: &str = include_str!("../../static/index.html");

/// GET / — single-page chat client driving the stateless `/bot` endpoint.
/// The snapshot lives in the browser's `localStorage`.
pub async fn index() -> Html<&'static str> {
    Html(INDEX)
}
