use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use summarizer_service_cli::{
    parse_target_url, ExtractiveBackend, NeuralBackend, SummaryBackend, Summarizer,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the article to summarize
    #[arg(short, long)]
    url: String,

    /// Summarization backend
    #[arg(short, long, value_enum, default_value_t = Backend::Extractive)]
    backend: Backend,

    /// Sentences to keep per chunk (extractive backend)
    #[arg(short, long, default_value_t = 5)]
    sentences: usize,

    /// Output token budget per chunk (neural backend)
    #[arg(short = 't', long, default_value_t = 256)]
    max_tokens: usize,

    /// Number of chunks summarized concurrently
    #[arg(short, long, default_value_t = 4)]
    concurrent: usize,

    /// Write the summary to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    Extractive,
    Neural,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let url = parse_target_url(&args.url)?;

    let backend: Arc<dyn SummaryBackend> = match args.backend {
        Backend::Extractive => Arc::new(ExtractiveBackend::new(args.sentences)),
        Backend::Neural => {
            let api_key = env::var("OPENAI_API_KEY")
                .map_err(|_| "OPENAI_API_KEY must be set for the neural backend")?;
            let model =
                env::var("SUMMARY_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
            let mut backend = NeuralBackend::new(api_key, model, args.max_tokens);
            if let Ok(api_url) = env::var("OPENAI_API_URL") {
                backend = backend.with_endpoint(api_url);
            }
            Arc::new(backend)
        }
    };

    let summarizer = Summarizer::new(backend, args.concurrent)?;
    let article = summarizer.summarize_url(&url).await?;

    let text = format!("{}\n\n{}\n", article.title, article.summary);
    match args.output {
        Some(path) => tokio::fs::write(&path, &text).await?,
        None => print!("{text}"),
    }

    Ok(())
}
