//! Relay service: one route that forwards a chat message to Gemini and hands
//! back the generated text. Stateless per request; upstream failures are
//! logged here and surfaced to callers only as a generic message.

pub mod gemini;

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use gemini::GenerateText;

pub const DEFAULT_PORT: u16 = 3600;

const MISSING_FIELDS: &str = "Missing 'chat' or 'model' in request body.";
const UPSTREAM_FAILED: &str = "Failed to fetch response from Gemini API";

#[derive(Clone)]
pub struct RelayState {
    upstream: Arc<dyn GenerateText>,
}

impl RelayState {
    pub fn new(upstream: Arc<dyn GenerateText>) -> Self {
        Self { upstream }
    }
}

/// Fields default to empty so validation, not body rejection, produces the
/// 400 for a missing key.
#[derive(Deserialize)]
pub struct RelayRequest {
    #[serde(default)]
    pub chat: String,
    #[serde(default)]
    pub model: String,
}

#[derive(Serialize)]
struct RelayReply {
    response: String,
}

#[derive(Serialize)]
struct RelayErrorBody {
    error: String,
}

pub fn app(state: RelayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(relay_chat))
        .layer(cors)
        .with_state(state)
}

/// `POST /chat`: forward one message to the model named in the request.
async fn relay_chat(
    State(state): State<RelayState>,
    Json(req): Json<RelayRequest>,
) -> Response {
    if req.chat.is_empty() || req.model.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, MISSING_FIELDS);
    }

    match state.upstream.generate(&req.model, &req.chat).await {
        Ok(text) => (StatusCode::OK, Json(RelayReply { response: text })).into_response(),
        Err(e) => {
            tracing::error!(model = %req.model, error = %e, "Gemini API error");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILED)
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(RelayErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
