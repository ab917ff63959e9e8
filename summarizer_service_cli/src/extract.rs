use scraper::{ElementRef, Html, Selector};

use crate::error::PipelineError;

/// Class names commonly carrying the main article text, tried in order
/// after the `<article>` tag.
const BODY_CLASSES: &[&str] = &[
    "article-body",
    "articleBody",
    "story-body",
    "post-content",
    "entry-content",
    "main-content",
];

const UNTITLED: &str = "Untitled article";

#[derive(Debug, Clone)]
pub struct ExtractedArticle {
    pub title: String,
    pub text: String,
}

/// Locate the title and the main article text in arbitrary HTML.
///
/// Body search order: `<article>`, then a `<div>` with a known article-body
/// class, then `<main>`, then the whole `<body>`. The first container that
/// yields at least one non-empty paragraph wins.
pub fn extract_article(html: &str) -> Result<ExtractedArticle, PipelineError> {
    let doc = Html::parse_document(html);
    let text = extract_body_text(&doc).ok_or(PipelineError::NoContent)?;
    Ok(ExtractedArticle {
        title: extract_title(&doc),
        text,
    })
}

fn extract_title(doc: &Html) -> String {
    let og_title = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
    if let Some(meta) = doc.select(&og_title).next() {
        if let Some(content) = meta.value().attr("content") {
            let content = content.trim();
            if !content.is_empty() {
                return content.to_string();
            }
        }
    }

    for tag in ["title", "h1"] {
        let selector = Selector::parse(tag).unwrap();
        if let Some(el) = doc.select(&selector).next() {
            let text = el.text().collect::<String>();
            let text = text.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }

    UNTITLED.to_string()
}

fn extract_body_text(doc: &Html) -> Option<String> {
    let article = Selector::parse("article").unwrap();
    if let Some(el) = doc.select(&article).next() {
        if let Some(text) = paragraphs_of(el) {
            return Some(text);
        }
    }

    for class in BODY_CLASSES {
        let selector = Selector::parse(&format!("div.{class}")).unwrap();
        if let Some(el) = doc.select(&selector).next() {
            if let Some(text) = paragraphs_of(el) {
                return Some(text);
            }
        }
    }

    for tag in ["main", "body"] {
        let selector = Selector::parse(tag).unwrap();
        if let Some(el) = doc.select(&selector).next() {
            if let Some(text) = paragraphs_of(el) {
                return Some(text);
            }
        }
    }

    None
}

fn paragraphs_of(el: ElementRef) -> Option<String> {
    let p = Selector::parse("p").unwrap();
    let paragraphs: Vec<String> = el
        .select(&p)
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_article_tag() {
        let html = r#"
            <html><head><title>Page</title></head><body>
            <div class="article-body"><p>Sidebar teaser.</p></div>
            <article><p>First paragraph.</p><p>Second paragraph.</p></article>
            </body></html>"#;
        let article = extract_article(html).unwrap();
        assert_eq!(article.text, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn falls_back_to_known_div_class() {
        let html = r#"
            <html><body>
            <div class="story-body"><p>Story text here.</p></div>
            </body></html>"#;
        let article = extract_article(html).unwrap();
        assert_eq!(article.text, "Story text here.");
    }

    #[test]
    fn falls_back_to_body_paragraphs() {
        let html = "<html><body><p>Loose paragraph.</p></body></html>";
        let article = extract_article(html).unwrap();
        assert_eq!(article.text, "Loose paragraph.");
    }

    #[test]
    fn empty_article_tag_does_not_shadow_div() {
        let html = r#"
            <html><body>
            <article><img src="hero.jpg"></article>
            <div class="post-content"><p>Real content.</p></div>
            </body></html>"#;
        let article = extract_article(html).unwrap();
        assert_eq!(article.text, "Real content.");
    }

    #[test]
    fn no_paragraphs_is_an_error() {
        let html = "<html><body><div>no paragraph tags</div></body></html>";
        assert!(matches!(
            extract_article(html),
            Err(PipelineError::NoContent)
        ));
    }

    #[test]
    fn title_prefers_og_title() {
        let html = r#"
            <html><head>
            <meta property="og:title" content="OG Headline">
            <title>Tab Title</title>
            </head><body><p>x</p></body></html>"#;
        assert_eq!(extract_article(html).unwrap().title, "OG Headline");
    }

    #[test]
    fn title_falls_back_to_title_then_h1() {
        let html = "<html><body><h1>Only Heading</h1><p>x</p></body></html>";
        assert_eq!(extract_article(html).unwrap().title, "Only Heading");
    }

    #[test]
    fn missing_title_uses_placeholder() {
        let html = "<html><body><p>x</p></body></html>";
        assert_eq!(extract_article(html).unwrap().title, UNTITLED);
    }
}
