use super::*;
use super::gemini::GeminiError;

struct StubUpstream {
    reply: Option<&'static str>,
}

#[async_trait::async_trait]
impl GenerateText for StubUpstream {
    async fn generate(&self, _model: &str, _chat: &str) -> Result<String, GeminiError> {
        match self.reply {
            Some(text) => Ok(text.to_string()),
            None => Err(GeminiError::Status {
                status: 429,
                body: "quota exceeded detail".to_string(),
            }),
        }
    }
}

async fn call(
    reply: Option<&'static str>,
    chat: &str,
    model: &str,
) -> (StatusCode, serde_json::Value) {
    let state = RelayState::new(Arc::new(StubUpstream { reply }));
    let request = RelayRequest {
        chat: chat.to_string(),
        model: model.to_string(),
    };

    let response = relay_chat(State(state), Json(request)).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn valid_request_returns_generated_text() {
    let (status, body) = call(Some("hi there"), "Hello", "gemini-2.5-flash").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "hi there");
}

#[tokio::test]
async fn missing_chat_is_rejected() {
    let (status, body) = call(Some("unused"), "", "gemini-2.5-flash").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], MISSING_FIELDS);
}

#[tokio::test]
async fn missing_model_is_rejected() {
    let (status, body) = call(Some("unused"), "Hello", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], MISSING_FIELDS);
}

#[tokio::test]
async fn upstream_failure_stays_generic() {
    let (status, body) = call(None, "Hello", "gemini-2.5-flash").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], UPSTREAM_FAILED);
    // The upstream detail is logged, never surfaced.
    assert!(!body.to_string().contains("quota"));
}
