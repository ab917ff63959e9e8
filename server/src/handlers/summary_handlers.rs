use axum::{http::StatusCode, response::Html, Extension, Form};
use serde::Deserialize;
use tracing::{error, info};

use summarizer_service_cli::parse_target_url;

use crate::models::article::ArticleSummary;
use crate::pages;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LinkForm {
    pub link: String,
}

pub async fn home() -> Html<String> {
    Html(pages::home_page(None, None, None))
}

/// POST / — look the URL up in the cache, run the pipeline on a miss,
/// persist the result, and render the page either way.
pub async fn summarize(
    Extension(state): Extension<AppState>,
    Form(form): Form<LinkForm>,
) -> (StatusCode, Html<String>) {
    let url = match parse_target_url(&form.link) {
        Ok(url) => url,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(pages::home_page(Some(&form.link), None, Some(&e.to_string()))),
            );
        }
    };
    let link = url.to_string();

    // Cache lookup short-circuits the whole pipeline.
    match ArticleSummary::find_by_link(&state.pool, &link).await {
        Ok(Some(cached)) => {
            info!(%link, "cache hit");
            return (
                StatusCode::OK,
                Html(pages::home_page(
                    Some(&link),
                    Some((&cached.title, &cached.summary)),
                    None,
                )),
            );
        }
        Ok(None) => {}
        Err(e) => {
            error!(%link, error = %e, "cache lookup failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(pages::home_page(Some(&link), None, Some("Database error"))),
            );
        }
    }

    // Dropped on every exit path, including cancellation when the client
    // disconnects mid-pipeline.
    let _claim = match state.claim(&link) {
        Some(claim) => claim,
        None => {
            return (
                StatusCode::CONFLICT,
                Html(pages::home_page(
                    Some(&link),
                    None,
                    Some("This article is already being summarized, try again shortly."),
                )),
            );
        }
    };

    let result = state.summarizer.summarize_url(&url).await;

    let article = match result {
        Ok(article) => article,
        Err(e) => {
            error!(%link, error = %e, "summarization failed");
            return (
                StatusCode::BAD_GATEWAY,
                Html(pages::home_page(Some(&link), None, Some(&e.to_string()))),
            );
        }
    };

    if let Err(e) =
        ArticleSummary::insert(&state.pool, &link, &article.title, &article.summary).await
    {
        // The summary is still worth rendering even if caching it failed.
        error!(%link, error = %e, "failed to store summary");
    } else {
        info!(%link, title = %article.title, "stored new summary");
    }

    (
        StatusCode::OK,
        Html(pages::home_page(
            Some(&link),
            Some((&article.title, &article.summary)),
            None,
        )),
    )
}
