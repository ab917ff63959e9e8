pub mod backend;
pub mod chunk;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;

pub use backend::extractive::ExtractiveBackend;
pub use backend::neural::NeuralBackend;
pub use backend::SummaryBackend;
pub use error::PipelineError;
pub use pipeline::{parse_target_url, SummarizedArticle, Summarizer};
