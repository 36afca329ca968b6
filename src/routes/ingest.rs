use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::response;
use crate::state::SharedState;
use crate::submission::pipeline;

/// The lead-capture endpoint. Always answers 200 with an envelope; failures
/// are signaled in-band via `success: false`, never via the status line.
pub async fn ingest(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    match pipeline::run(&state, content_type, &body).await {
        Ok(outcome) => response::success(&outcome).into_response(),
        Err(err) => {
            tracing::warn!(%err, "submission rejected");
            response::failure(&err).into_response()
        }
    }
}

pub async fn ingest_options() -> Response {
    (
        [
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Methods", "POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type"),
            ("Access-Control-Max-Age", "86400"),
        ],
        StatusCode::NO_CONTENT,
    )
        .into_response()
}
