use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::backend::SummaryBackend;
use crate::chunk::{split_sentences, ChunkLimit};
use crate::error::PipelineError;

const DEFAULT_MAX_WORDS: usize = 600;

/// Extractive summarizer over sentence vectors.
///
/// Each sentence becomes a TF-IDF term vector; sentences are ranked by
/// cosine similarity to the document centroid and the top `max_sentences`
/// are emitted in original document order. Runs entirely in-process.
pub struct ExtractiveBackend {
    max_sentences: usize,
    max_words: usize,
}

impl ExtractiveBackend {
    pub fn new(max_sentences: usize) -> Self {
        Self {
            max_sentences: max_sentences.max(1),
            max_words: DEFAULT_MAX_WORDS,
        }
    }

    fn pick_sentences(&self, text: &str) -> String {
        let sentences = split_sentences(text);
        if sentences.len() <= self.max_sentences {
            return sentences.join(" ");
        }

        let tokenized: Vec<Vec<String>> =
            sentences.iter().map(|s| tokenize(s)).collect();
        let n = sentences.len() as f64;

        let mut df: HashMap<&str, usize> = HashMap::new();
        for terms in &tokenized {
            let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let vectors: Vec<HashMap<&str, f64>> = tokenized
            .iter()
            .map(|terms| {
                let mut vector: HashMap<&str, f64> = HashMap::new();
                for term in terms {
                    *vector.entry(term.as_str()).or_insert(0.0) += 1.0;
                }
                for (term, weight) in vector.iter_mut() {
                    let idf = (n / df[term] as f64).ln() + 1.0;
                    *weight *= idf;
                }
                vector
            })
            .collect();

        let mut centroid: HashMap<&str, f64> = HashMap::new();
        for vector in &vectors {
            for (&term, weight) in vector {
                *centroid.entry(term).or_insert(0.0) += weight / n;
            }
        }

        let mut ranked: Vec<(usize, f64)> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, cosine(v, &centroid)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut keep: Vec<usize> = ranked
            .iter()
            .take(self.max_sentences)
            .map(|&(i, _)| i)
            .collect();
        keep.sort_unstable();

        keep.iter()
            .map(|&i| sentences[i].as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 1)
        .map(str::to_lowercase)
        .collect()
}

fn cosine(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, w)| b.get(term).map(|bw| w * bw))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[async_trait]
impl SummaryBackend for ExtractiveBackend {
    fn chunk_limit(&self) -> ChunkLimit {
        ChunkLimit::Words(self.max_words)
    }

    async fn summarize(&self, text: &str) -> Result<String, PipelineError> {
        let summary = self.pick_sentences(text);
        if summary.is_empty() {
            return Err(PipelineError::NoContent);
        }
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        "extractive"
    }
}
