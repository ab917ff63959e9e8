mod db;
mod handlers;
mod models;
mod pages;
mod routes;
mod state;

use std::env;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    Extension, Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use summarizer_service_cli::{ExtractiveBackend, NeuralBackend, SummaryBackend, Summarizer};

use routes::{search::search_routes, summary::summary_routes};
use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pool = db::init_db().await.expect("failed to initialize database");

    let summarizer =
        Summarizer::new(backend_from_env(), 4).expect("failed to build summarizer");
    let state = AppState::new(pool, summarizer);

    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let cors = match env::var("CLIENT_URL") {
        Ok(client_url) => CorsLayer::new()
            .allow_origin(
                client_url
                    .parse::<HeaderValue>()
                    .expect("CLIENT_URL must be a valid origin"),
            )
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE]),
        Err(_) => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE]),
    };

    let app = Router::new()
        .merge(summary_routes())
        .nest("/search", search_routes())
        .layer(Extension(state))
        .layer(cors);

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = TcpListener::bind(&addr).await.expect("failed to bind");
    info!(%addr, "listening");
    axum::serve(listener, app).await.expect("server error");
}

/// Pick the summarization backend from the environment. Extractive needs no
/// configuration; the neural backend needs an API key.
fn backend_from_env() -> Arc<dyn SummaryBackend> {
    match env::var("SUMMARY_BACKEND").as_deref() {
        Ok("neural") => {
            let api_key = env::var("OPENAI_API_KEY")
                .expect("OPENAI_API_KEY must be set for the neural backend");
            let model =
                env::var("SUMMARY_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
            let max_tokens = env::var("SUMMARY_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256);
            let mut backend = NeuralBackend::new(api_key, model, max_tokens);
            if let Ok(api_url) = env::var("OPENAI_API_URL") {
                backend = backend.with_endpoint(api_url);
            }
            Arc::new(backend)
        }
        _ => {
            let sentences = env::var("SUMMARY_SENTENCES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5);
            Arc::new(ExtractiveBackend::new(sentences))
        }
    }
}
