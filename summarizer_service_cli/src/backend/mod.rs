pub mod extractive;
pub mod neural;

use async_trait::async_trait;

use crate::chunk::ChunkLimit;
use crate::error::PipelineError;

/// A summarization backend: maps one chunk of text to a shorter text,
/// within the length budget it was configured with.
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    /// Largest input a single `summarize` call should receive.
    fn chunk_limit(&self) -> ChunkLimit;

    async fn summarize(&self, text: &str) -> Result<String, PipelineError>;

    fn name(&self) -> &'static str;
}
