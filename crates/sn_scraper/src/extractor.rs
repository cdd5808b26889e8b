//! Readable-text extraction from raw article HTML.
//!
//! The heuristic runs in a fixed order: drop boilerplate elements, resolve a
//! title, try the content containers in priority order, fall back to
//! paragraph scanning, then normalize, gate on length and truncate.

use lazy_static::lazy_static;
use scraper::{Html, Selector};
use sn_core::{Error, ExtractedArticle, Result};

/// Upper bound on the body handed to the model.
pub const MAX_CONTENT_CHARS: usize = 12_000;

/// Anything shorter is treated as a page with no readable article.
pub const MIN_CONTENT_CHARS: usize = 300;

/// Paragraphs at or under this length are captions, bylines and the like.
pub const MIN_PARAGRAPH_CHARS: usize = 40;

pub const FALLBACK_TITLE: &str = "Article";

/// Elements removed before any text is read.
pub const NOISE_SELECTOR: &str = "script, style, nav, footer, header, aside, iframe, noscript";

/// Content containers in priority order with the length their text must exceed.
/// List order breaks ties, not text length.
pub const CONTENT_CANDIDATES: &[(&str, usize)] = &[
    ("article", 500),
    (".article-content", 500),
    (".post-content", 500),
    (".entry-content", 500),
    ("main", 500),
];

lazy_static! {
    static ref NOISE: Selector = Selector::parse(NOISE_SELECTOR).expect("noise selector is valid");
    static ref H1: Selector = Selector::parse("h1").expect("h1 selector is valid");
    static ref TITLE: Selector = Selector::parse("title").expect("title selector is valid");
    static ref PARAGRAPH: Selector = Selector::parse("p").expect("p selector is valid");
    static ref CANDIDATES: Vec<(Selector, usize)> = CONTENT_CANDIDATES
        .iter()
        .map(|(css, min)| (Selector::parse(css).expect("candidate selector is valid"), *min))
        .collect();
}

/// Extracts the title and a bounded, whitespace-normalized body from `html`.
pub fn extract_article(html: &str) -> Result<ExtractedArticle> {
    let mut document = Html::parse_document(html);
    strip_noise(&mut document);

    let title = resolve_title(&document);
    let raw = select_container(&document).unwrap_or_else(|| paragraph_text(&document));
    let content = normalize_whitespace(&raw);

    if content.chars().count() < MIN_CONTENT_CHARS {
        return Err(Error::Extraction("Not enough readable content found".to_string()));
    }

    let content = truncate_chars(&content, MAX_CONTENT_CHARS).trim_end().to_string();
    Ok(ExtractedArticle { title, content })
}

/// Detaches every boilerplate element from the tree.
///
/// Queries must go through `root_element()` afterwards: detached nodes stay in
/// the arena and a whole-document select would still visit them.
fn strip_noise(document: &mut Html) {
    let ids: Vec<_> = document
        .root_element()
        .select(&NOISE)
        .map(|el| (*el).id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn resolve_title(document: &Html) -> String {
    first_text(document, &H1)
        .or_else(|| first_text(document, &TITLE))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .root_element()
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Text of the first candidate container that is long enough. Every element
/// matching a candidate contributes, in document order.
pub(crate) fn select_container(document: &Html) -> Option<String> {
    CANDIDATES.iter().find_map(|(selector, min_chars)| {
        let text: String = document
            .root_element()
            .select(selector)
            .flat_map(|el| el.text())
            .collect();
        let text = text.trim();
        (text.chars().count() > *min_chars).then(|| text.to_string())
    })
}

/// Newline-joined text of every paragraph longer than [`MIN_PARAGRAPH_CHARS`].
pub(crate) fn paragraph_text(document: &Html) -> String {
    document
        .root_element()
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .fold(String::new(), |mut acc, text| {
            acc.push_str(&text);
            acc.push('\n');
            acc
        })
}

/// Collapses every whitespace run to one space and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PHRASE: &str = "Caching keeps frequently used data close to the code that reads it. ";

    fn filler(chars: usize) -> String {
        let mut text: String = PHRASE.chars().cycle().take(chars).collect();
        text.pop();
        text.push('.');
        text
    }

    fn page(head: &str, body: &str) -> String {
        format!("<html><head>{}</head><body>{}</body></html>", head, body)
    }

    fn has_double_whitespace(text: &str) -> bool {
        let chars: Vec<char> = text.chars().collect();
        chars.windows(2).any(|w| w[0].is_whitespace() && w[1].is_whitespace())
    }

    #[test]
    fn test_article_wins_over_later_candidates() {
        let article_text = filler(600);
        let main_text = format!("MAIN {}", filler(900));
        let html = page(
            "<title>How Caching Works</title>",
            &format!("<article>{}</article><main>{}</main>", article_text, main_text),
        );

        let extracted = extract_article(&html).unwrap();
        assert_eq!(extracted.content, article_text);
        assert!(!extracted.content.contains("MAIN"));
    }

    #[test]
    fn test_candidate_order_breaks_ties() {
        let html = page(
            "",
            &format!(
                "<div class=\"entry-content\">ENTRY {}</div><div class=\"post-content\">POST {}</div>",
                filler(2000),
                filler(700)
            ),
        );

        let extracted = extract_article(&html).unwrap();
        assert!(extracted.content.starts_with("POST"));
    }

    #[test]
    fn test_short_article_falls_through_to_paragraphs() {
        let first = filler(200);
        let second = format!("Second {}", filler(180));
        let html = page(
            "",
            &format!(
                "<article><p>Too short for the container threshold.</p></article><div><p>{}</p><p>{}</p></div>",
                first, second
            ),
        );

        let extracted = extract_article(&html).unwrap();
        assert_eq!(extracted.content, format!("{} {}", first, second));
    }

    #[test]
    fn test_paragraph_fallback_skips_short_paragraphs() {
        let p10 = "Ten chars.";
        let p55 = "a".repeat(55);
        let p60 = "b".repeat(60);
        let html = page("", &format!("<p>{}</p><p>{}</p><p>{}</p>", p10, p55, p60));
        let document = Html::parse_document(&html);

        assert!(select_container(&document).is_none());
        assert_eq!(paragraph_text(&document), format!("{}\n{}\n", p55, p60));
    }

    #[test]
    fn test_paragraph_fallback_keeps_document_order() {
        let paragraphs: Vec<String> = (0..6).map(|i| format!("Paragraph {} {}", i, filler(80))).collect();
        let body: String = paragraphs.iter().map(|p| format!("<p>{}</p>", p)).collect();

        let extracted = extract_article(&page("", &body)).unwrap();
        assert_eq!(extracted.content, paragraphs.join(" "));
    }

    #[test]
    fn test_noise_is_removed_before_reading() {
        let html = page(
            "<title>Document Title</title><style>body { color: red; }</style>",
            &format!(
                "<header><h1>Site Banner</h1></header><nav>Home About Contact</nav>\
                 <article>{}<script>var tracking = true;</script><aside>Related posts</aside></article>\
                 <footer>Copyright</footer>",
                filler(650)
            ),
        );

        let extracted = extract_article(&html).unwrap();
        assert_eq!(extracted.title, "Document Title");
        assert!(!extracted.content.contains("tracking"));
        assert!(!extracted.content.contains("Related posts"));
        assert!(!extracted.content.contains("Home About"));
    }

    #[test]
    fn test_title_resolution() {
        let body = format!("<h1>  Heading Title </h1><article>{}</article>", filler(600));
        let extracted = extract_article(&page("<title>Doc</title>", &body)).unwrap();
        assert_eq!(extracted.title, "Heading Title");

        let body = format!("<h1> </h1><article>{}</article>", filler(600));
        let extracted = extract_article(&page("", &body)).unwrap();
        assert_eq!(extracted.title, FALLBACK_TITLE);
    }

    #[test]
    fn test_thin_page_is_an_extraction_error() {
        let html = page(
            "<title>A Perfectly Good Title</title>",
            &format!("<h1>Heading</h1><p>{}</p>", filler(250)),
        );

        let err = extract_article(&html).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
        assert_eq!(err.to_string(), "Not enough readable content found");
    }

    #[test]
    fn test_div_only_content_is_not_recovered() {
        let html = page("", &format!("<div class=\"story\">{}</div>", filler(3000)));
        assert!(matches!(extract_article(&html), Err(Error::Extraction(_))));
    }

    #[test]
    fn test_content_is_normalized_and_truncated() {
        let spaced = PHRASE.replace(' ', " \n\t  ").repeat(400);
        let html = page("", &format!("<article>{}</article>", spaced));

        let extracted = extract_article(&html).unwrap();
        assert!(extracted.content.chars().count() <= MAX_CONTENT_CHARS);
        assert!(extracted.content.chars().count() >= MAX_CONTENT_CHARS - 1);
        assert!(!has_double_whitespace(&extracted.content));
        assert_eq!(extracted.content, extracted.content.trim());
    }

    #[test]
    fn test_truncation_respects_multibyte_characters() {
        let text = "Überraschung für Äpfel und Öl. ".repeat(600);
        let html = page("", &format!("<article>{}</article>", text));

        let extracted = extract_article(&html).unwrap();
        assert!(extracted.content.chars().count() <= MAX_CONTENT_CHARS);
        assert!(extracted.content.starts_with("Überraschung"));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\n b\t\tc  "), "a b c");
        assert_eq!(normalize_whitespace("\u{a0}x\u{a0}\u{a0}y"), "x y");
        assert_eq!(normalize_whitespace(""), "");
    }

    const GAPS: &[&str] = &[" ", "\n", "\t", "  \n\t "];

    const BLOCKS: &[(&str, &str)] = &[
        ("p", "p"),
        ("div", "div"),
        ("section", "section"),
        ("span", "span"),
        ("main", "main"),
        ("div class=\"post-content\"", "div"),
        ("div class=\"entry-content\"", "div"),
        ("article", "article"),
        ("script", "script"),
        ("nav", "nav"),
        ("aside", "aside"),
        ("footer", "footer"),
    ];

    fn spaced_words(count: std::ops::Range<usize>) -> impl Strategy<Value = String> {
        prop::collection::vec(("[a-z]{4,10}", prop::sample::select(GAPS)), count)
            .prop_map(|parts| parts.into_iter().map(|(word, gap)| format!("{}{}", word, gap)).collect())
    }

    fn blocks(text: &'static str, count: std::ops::Range<usize>) -> impl Strategy<Value = String> {
        prop::collection::vec((prop::sample::select(BLOCKS), text), count).prop_map(|blocks| {
            blocks
                .into_iter()
                .map(|((open, close), text)| format!("<{}>{}</{}>", open, text, close))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn extracted_content_is_normalized_and_bounded(body in blocks("[a-zA-Z0-9 .,\n\t]{0,600}", 0..40)) {
            if let Ok(extracted) = extract_article(&page("", &body)) {
                let chars = extracted.content.chars().count();
                prop_assert!((MIN_CONTENT_CHARS..=MAX_CONTENT_CHARS).contains(&chars));
                prop_assert!(!has_double_whitespace(&extracted.content));
                prop_assert_eq!(extracted.content.trim(), extracted.content.as_str());
            }
        }

        #[test]
        fn thin_pages_never_extract(body in blocks("[a-z ]{0,40}", 0..7)) {
            let result = extract_article(&page("<title>Thin</title>", &body));
            prop_assert!(matches!(result, Err(Error::Extraction(_))));
        }

        #[test]
        fn long_article_always_wins(
            article in spaced_words(120..400),
            other in spaced_words(0..200),
            other_tag in prop::sample::select(BLOCKS[..7].to_vec()),
            other_first in any::<bool>(),
        ) {
            let article_block = format!("<article><nav>NAVIGATION</nav>{}</article>", article);
            let other_block = format!("<{}>{}</{}>", other_tag.0, other, other_tag.1);
            let body = if other_first {
                format!("{}{}", other_block, article_block)
            } else {
                format!("{}{}", article_block, other_block)
            };

            let extracted = extract_article(&page("", &body)).unwrap();
            prop_assert_eq!(extracted.content, normalize_whitespace(&article));
        }
    }
}
