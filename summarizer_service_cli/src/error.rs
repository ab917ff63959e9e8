use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),

    #[error("page is behind bot protection")]
    BotProtected,

    #[error("no article content found")]
    NoContent,

    #[error("summarization backend error: {0}")]
    Backend(String),
}
