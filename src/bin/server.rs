use std::sync::Arc;

use chatai::server::{self, gemini::GeminiClient, RelayState, DEFAULT_PORT};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("GOOGLE_API_KEY").expect("GOOGLE_API_KEY required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| DEFAULT_PORT.to_string())
        .parse()
        .expect("invalid PORT");

    let state = RelayState::new(Arc::new(GeminiClient::new(api_key)));
    let app = server::app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "chatai relay listening");
    axum::serve(listener, app).await.expect("server failed");
}
