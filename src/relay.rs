use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3600";

/// How a send can fail, mirrored into the transcript by the caller: an error
/// payload from the relay gets the "Error:" prefix, a failed HTTP call gets
/// "Server error:".
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Http(String),
}

#[derive(Serialize)]
struct ChatPayload<'a> {
    chat: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: String,
}

#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send one message through the relay and return the generated text.
    pub async fn send(&self, chat: &str, model: &str) -> Result<String, ClientError> {
        let url = format!("{}/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ChatPayload { chat, model })
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        let ok = response.status().is_success();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        interpret_reply(ok, &body)
    }
}

/// Pure reply interpretation: a success body yields its `response`, an error
/// status yields its `error` payload, anything unparseable is a transport
/// failure.
fn interpret_reply(ok: bool, body: &str) -> Result<String, ClientError> {
    let reply: ChatReply =
        serde_json::from_str(body).map_err(|e| ClientError::Http(e.to_string()))?;
    if ok {
        Ok(reply.response)
    } else {
        Err(ClientError::Api(reply.error))
    }
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
