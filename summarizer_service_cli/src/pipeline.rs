use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::backend::SummaryBackend;
use crate::chunk::split_text;
use crate::error::PipelineError;
use crate::extract::extract_article;
use crate::fetch::Fetcher;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizedArticle {
    pub title: String,
    pub summary: String,
}

/// Parse and validate a user-supplied article URL. Only absolute http(s)
/// URLs are accepted.
pub fn parse_target_url(raw: &str) -> Result<Url, PipelineError> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PipelineError::UnsupportedScheme(other.to_string())),
    }
}

/// The whole pipeline: fetch, extract, chunk, summarize per chunk,
/// recombine.
pub struct Summarizer {
    fetcher: Fetcher,
    backend: Arc<dyn SummaryBackend>,
    concurrent_chunks: usize,
}

impl Summarizer {
    pub fn new(
        backend: Arc<dyn SummaryBackend>,
        concurrent_chunks: usize,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            fetcher: Fetcher::new()?,
            backend,
            concurrent_chunks: concurrent_chunks.max(1),
        })
    }

    pub async fn summarize_url(&self, url: &Url) -> Result<SummarizedArticle, PipelineError> {
        let html = self.fetcher.fetch(url).await?;
        let article = extract_article(&html)?;
        info!(%url, title = %article.title, chars = article.text.len(), "extracted article");

        let summary = self.summarize_text(&article.text).await?;
        Ok(SummarizedArticle {
            title: article.title,
            summary,
        })
    }

    /// Chunk the text to the backend's limit, summarize chunks concurrently
    /// (`buffered` keeps document order), and join the results.
    pub async fn summarize_text(&self, text: &str) -> Result<String, PipelineError> {
        let chunks = split_text(text, self.backend.chunk_limit());
        if chunks.is_empty() {
            return Err(PipelineError::NoContent);
        }
        debug!(chunks = chunks.len(), backend = self.backend.name(), "summarizing");

        let summaries: Vec<String> = stream::iter(chunks)
            .map(|chunk| {
                let backend = Arc::clone(&self.backend);
                async move { backend.summarize(&chunk).await }
            })
            .buffered(self.concurrent_chunks)
            .try_collect()
            .await?;

        Ok(summaries.join(" "))
    }
}
