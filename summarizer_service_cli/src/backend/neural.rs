use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::json;
use tracing::debug;

use crate::backend::SummaryBackend;
use crate::chunk::ChunkLimit;
use crate::error::PipelineError;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MAX_INPUT_TOKENS: usize = 3000;

const SYSTEM_PROMPT: &str = "You are a news summarizer. Summarize the article text \
you are given into short, factual prose. Keep names, numbers and dates exact. \
Do not add commentary or information that is not in the text.";

/// Summarization via a pretrained generative model behind an
/// OpenAI-compatible chat-completions endpoint.
pub struct NeuralBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    max_input_tokens: usize,
}

impl NeuralBackend {
    pub fn new(api_key: String, model: String, max_tokens: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key,
            model,
            max_tokens,
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
        }
    }

    /// Point the backend at a different OpenAI-compatible endpoint, e.g. a
    /// locally hosted model server.
    pub fn with_endpoint(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }
}

#[async_trait]
impl SummaryBackend for NeuralBackend {
    fn chunk_limit(&self) -> ChunkLimit {
        ChunkLimit::ApproxTokens(self.max_input_tokens)
    }

    async fn summarize(&self, text: &str) -> Result<String, PipelineError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| PipelineError::Backend(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": text },
            ],
            "temperature": 0.3,
            "max_tokens": self.max_tokens,
        });

        debug!(model = %self.model, input_chars = text.len(), "calling model endpoint");
        let response = self
            .client
            .post(&self.api_url)
            .headers(headers)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Backend(format!(
                "model endpoint returned {status}"
            )));
        }

        let body = response.json::<serde_json::Value>().await?;
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PipelineError::Backend("model response had no content".into()))
    }

    fn name(&self) -> &'static str {
        "neural"
    }
}
