use axum::{
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::models::article::ArticleSummary;
use crate::pages;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub async fn search_page() -> Html<String> {
    Html(pages::search_page())
}

/// GET /search/articles?q= — substring search over stored titles,
/// projected to id/title/link. An empty query returns an empty array.
pub async fn search_articles(
    Extension(state): Extension<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    if params.q.is_empty() {
        return Json(json!([])).into_response();
    }

    match ArticleSummary::search_titles(&state.pool, &params.q).await {
        Ok(hits) => Json(hits).into_response(),
        Err(e) => {
            error!(error = %e, "title search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Database error" })),
            )
                .into_response()
        }
    }
}
