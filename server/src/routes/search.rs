use axum::{routing::get, Router};

use crate::handlers::search_handlers::{search_articles, search_page};

pub fn search_routes() -> Router {
    Router::new()
        .route("/", get(search_page))
        .route("/articles", get(search_articles))
}
