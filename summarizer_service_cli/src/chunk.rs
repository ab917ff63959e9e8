/// Input-size limit of a summarization backend. Word counts suit the
/// extractive backend; the neural backend budgets in model tokens, which
/// are approximated from character count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkLimit {
    Words(usize),
    ApproxTokens(usize),
}

impl ChunkLimit {
    fn max(&self) -> usize {
        match *self {
            ChunkLimit::Words(n) | ChunkLimit::ApproxTokens(n) => n,
        }
    }

    fn measure(&self, text: &str) -> usize {
        match self {
            ChunkLimit::Words(_) => text.split_whitespace().count(),
            ChunkLimit::ApproxTokens(_) => approx_tokens(text),
        }
    }
}

/// Rough token estimate for English prose: one token per four characters.
pub fn approx_tokens(text: &str) -> usize {
    (text.chars().count() + 3) / 4
}

/// Split text into chunks no larger than `limit`, keeping sentences whole
/// where possible. Chunk size is measured on the joined text, spaces
/// included. A single sentence over the limit is hard-split on word
/// boundaries. Empty text yields no chunks.
pub fn split_text(text: &str, limit: ChunkLimit) -> Vec<String> {
    let max = limit.max();
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        if limit.measure(&sentence) > max {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            chunks.extend(hard_split(&sentence, limit));
            continue;
        }

        if current.is_empty() {
            current = sentence;
            continue;
        }

        let candidate = format!("{current} {sentence}");
        if limit.measure(&candidate) > max {
            chunks.push(std::mem::replace(&mut current, sentence));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Split prose into sentences on terminal punctuation. Trailing text
/// without a terminator counts as a sentence too.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

fn hard_split(sentence: &str, limit: ChunkLimit) -> Vec<String> {
    let max = limit.max();
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in sentence.split_whitespace() {
        if !current.is_empty() {
            let candidate = format!("{current} {word}");
            if limit.measure(&candidate) > max {
                chunks.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = split_text("One sentence. Another one.", ChunkLimit::Words(100));
        assert_eq!(chunks, vec!["One sentence. Another one."]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_text("", ChunkLimit::Words(10)).is_empty());
        assert!(split_text("   \n ", ChunkLimit::Words(10)).is_empty());
    }

    #[test]
    fn splits_on_sentence_boundaries() {
        let text = "Alpha beta gamma delta. Epsilon zeta eta theta. Iota kappa.";
        let chunks = split_text(text, ChunkLimit::Words(5));
        assert_eq!(
            chunks,
            vec![
                "Alpha beta gamma delta.",
                "Epsilon zeta eta theta.",
                "Iota kappa.",
            ]
        );
    }

    #[test]
    fn packs_sentences_up_to_the_limit() {
        let text = "One two. Three four. Five six seven eight nine.";
        let chunks = split_text(text, ChunkLimit::Words(4));
        assert_eq!(chunks[0], "One two. Three four.");
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn oversized_sentence_is_hard_split() {
        let text = "one two three four five six seven";
        let chunks = split_text(text, ChunkLimit::Words(3));
        assert_eq!(chunks, vec!["one two three", "four five six", "seven"]);
    }

    #[test]
    fn every_chunk_respects_the_word_limit() {
        let text = "Lorem ipsum dolor sit amet. ".repeat(40);
        for chunk in split_text(&text, ChunkLimit::Words(12)) {
            assert!(chunk.split_whitespace().count() <= 12, "chunk too big: {chunk}");
        }
    }

    #[test]
    fn approx_token_limit_bounds_chunk_size() {
        let text = "Some reasonably long sentence about nothing much. ".repeat(30);
        let chunks = split_text(&text, ChunkLimit::ApproxTokens(40));
        assert!(chunks.len() > 1);
        for chunk in chunks {
            assert!(approx_tokens(&chunk) <= 40, "chunk too big: {chunk}");
        }
    }

    #[test]
    fn sentence_split_keeps_terminators_and_tail() {
        let sentences = split_sentences("First. Second! Third? Trailing fragment");
        assert_eq!(
            sentences,
            vec!["First.", "Second!", "Third?", "Trailing fragment"]
        );
    }
}
