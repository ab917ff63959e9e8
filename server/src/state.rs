use dashmap::DashMap;
use sqlx::SqlitePool;
use std::sync::Arc;
use summarizer_service_cli::Summarizer;

/// Shared application state: the summary cache pool, the pipeline, and the
/// set of URLs currently being summarized.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub summarizer: Arc<Summarizer>,
    in_flight: Arc<DashMap<String, ()>>,
}

/// Claim on a URL being summarized. Dropping it releases the claim, so a
/// request cancelled mid-pipeline (client disconnect drops the handler
/// future) cannot leave its URL stuck in flight.
pub struct InFlightClaim {
    map: Arc<DashMap<String, ()>>,
    link: String,
}

impl Drop for InFlightClaim {
    fn drop(&mut self) {
        self.map.remove(&self.link);
    }
}

impl AppState {
    pub fn new(pool: SqlitePool, summarizer: Summarizer) -> Self {
        Self {
            pool,
            summarizer: Arc::new(summarizer),
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Claim a URL for summarization. Returns None when another request is
    /// already working on the same URL.
    pub fn claim(&self, link: &str) -> Option<InFlightClaim> {
        if self.in_flight.insert(link.to_string(), ()).is_some() {
            return None;
        }
        Some(InFlightClaim {
            map: Arc::clone(&self.in_flight),
            link: link.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use summarizer_service_cli::ExtractiveBackend;

    async fn test_state() -> AppState {
        let pool = db::test_pool().await;
        let summarizer = Summarizer::new(Arc::new(ExtractiveBackend::new(3)), 2).unwrap();
        AppState::new(pool, summarizer)
    }

    #[tokio::test]
    async fn second_claim_of_same_link_fails_until_released() {
        let state = test_state().await;

        let claim = state.claim("https://example.com/a").unwrap();
        assert!(state.claim("https://example.com/a").is_none());
        assert!(state.claim("https://example.com/b").is_some());

        drop(claim);
        assert!(state.claim("https://example.com/a").is_some());
    }

    #[tokio::test]
    async fn cancelled_request_releases_its_claim() {
        let state = test_state().await;

        let task = {
            let state = state.clone();
            tokio::spawn(async move {
                let _claim = state.claim("https://example.com/slow").unwrap();
                std::future::pending::<()>().await;
            })
        };

        // Let the task run up to its await point, holding the claim.
        tokio::task::yield_now().await;
        assert!(state.claim("https://example.com/slow").is_none());

        task.abort();
        let _ = task.await;

        assert!(state.claim("https://example.com/slow").is_some());
    }
}
