use std::time::Duration;

use backoff::{future::retry, ExponentialBackoff};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::error::PipelineError;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; quickfacts-summarizer/0.1)";

/// Markers that identify a bot-protection interstitial instead of the page
/// the URL actually points at.
const CHALLENGE_MARKERS: &[&str] = &[
    "Attention Required!",
    "Checking your browser",
    "Just a moment...",
    "cf-browser-verification",
];

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, PipelineError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(USER_AGENT)
                .build()?,
        })
    }

    /// Fetch the page body, retrying transient failures (connection errors,
    /// 429, 5xx) with exponential backoff. Other error statuses and
    /// bot-protection pages fail immediately.
    pub async fn fetch(&self, url: &Url) -> Result<String, PipelineError> {
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(60)),
            ..ExponentialBackoff::default()
        };

        retry(backoff, || async {
            match self.fetch_once(url).await {
                Ok(body) => Ok(body),
                Err(e) if is_transient(&e) => {
                    warn!(%url, error = %e, "fetch failed, retrying");
                    Err(backoff::Error::transient(e))
                }
                Err(e) => Err(backoff::Error::permanent(e)),
            }
        })
        .await
    }

    async fn fetch_once(&self, url: &Url) -> Result<String, PipelineError> {
        debug!(%url, "fetching");
        let res = self.client.get(url.clone()).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(PipelineError::Status(status));
        }

        let body = res.text().await?;
        if looks_like_bot_challenge(&body) {
            warn!(%url, "page returned a bot-protection challenge");
            return Err(PipelineError::BotProtected);
        }

        Ok(body)
    }
}

// Connection failures, 429 and 5xx are worth another attempt; other
// statuses and bot challenges will not change on retry.
fn is_transient(err: &PipelineError) -> bool {
    match err {
        PipelineError::Network(_) => true,
        PipelineError::Status(status) => {
            status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
        }
        _ => false,
    }
}

pub fn looks_like_bot_challenge(body: &str) -> bool {
    CHALLENGE_MARKERS.iter().any(|m| body.contains(m))
}
