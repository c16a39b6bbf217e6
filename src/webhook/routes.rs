use std::io::{self, Write};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::webhook::log::WebhookLog;

#[derive(Clone)]
pub struct AppState {
    pub log: Arc<WebhookLog>,
}

/// Acknowledgment returned for a logged payload.
#[derive(Debug, Serialize)]
struct Ack {
    status: &'static str,
    msg: &'static str,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Whether the request declares a JSON body: `application/json` or any
/// `+json` suffixed media type. Parameters (charset etc.) are ignored.
fn declares_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// Accepts a JSON body of any shape, appends it to the payload log and
/// acknowledges. Non-JSON content types and malformed bodies are rejected
/// with 400 and leave no log entry.
async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !declares_json(&headers) {
        return (
            StatusCode::BAD_REQUEST,
            "Content-Type must be application/json",
        )
            .into_response();
    }

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!("rejecting malformed webhook body: {err}");
            return (StatusCode::BAD_REQUEST, "request body is not valid JSON").into_response();
        }
    };

    echo_payload(&payload);

    if let Err(err) = state.log.append(&payload) {
        tracing::error!("failed to append webhook log entry: {err}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to log payload").into_response();
    }

    (
        StatusCode::OK,
        Json(Ack {
            status: "ok",
            msg: "payload logged",
        }),
    )
        .into_response()
}

/// Live-demo console echo. This is product output on stdout, kept apart
/// from the tracing diagnostics.
fn echo_payload(payload: &Value) {
    let rendered =
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
    let mut stdout = io::stdout();
    let _ = writeln!(stdout, "\n=== webhook received ===\n{rendered}\n========================\n");
    let _ = stdout.flush();
}

async fn healthz() -> &'static str {
    "OK\n"
}
