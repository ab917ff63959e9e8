use axum::{routing::get, Router};

use crate::handlers::summary_handlers::{home, summarize};

pub fn summary_routes() -> Router {
    Router::new().route("/", get(home).post(summarize))
}
