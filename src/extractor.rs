//! Title and body extraction from heterogeneous news markup.
//!
//! Publishers disagree on where the headline and story text live, so both are
//! located by walking an ordered list of [`Rule`]s and stopping at the first
//! rule whose output passes a length check. Each rule looks only at the
//! first element its selector matches.
//!
//! # Title rules
//!
//! | Order | Selector | Reads |
//! |-------|----------|-------|
//! | 1 | `h1` | visible text |
//! | 2 | `h2` | visible text |
//! | 3 | `.article-title` | visible text |
//! | 4 | `.news-title` | visible text |
//! | 5 | `.title` | visible text |
//! | 6 | `meta[property="og:title"]` | `content` attribute |
//! | 7 | `meta[name="title"]` | `content` attribute |
//!
//! # Body rules
//!
//! `article`, `.article-body`, `.news-content`, `.article-content`,
//! `#article-view-content-div`, `.view-content`, `.article_view`, read with
//! script/style/nav/aside/header/footer subtrees skipped. When none of them
//! yields enough text, every `<p>` in the document is collected instead.

use crate::charset::decode_html;
use crate::error::PipelineError;
use crate::fetcher::Page;
use crate::models::Article;
use crate::utils::{char_len, truncate_for_log};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};

/// A title must be longer than this many characters.
pub const MIN_TITLE_CHARS: usize = 5;
/// A selector-matched body must be longer than this many characters.
pub const MIN_BODY_CHARS: usize = 100;
/// The paragraph fallback must reach at least this many characters.
pub const MIN_FALLBACK_CHARS: usize = 50;

/// Descendants whose text never counts as article body.
const STRIPPED_TAGS: [&str; 6] = ["script", "style", "nav", "aside", "header", "footer"];

/// How a matched element is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    /// All text nodes concatenated, trimmed.
    Text,
    /// The value of the named attribute, trimmed.
    Attribute(&'static str),
    /// Trimmed text nodes joined by newlines, boilerplate subtrees skipped.
    CleanedText,
}

/// One step of a fallback chain: a selector and the way to read its match.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    selector: Selector,
    read: Read,
}

impl Rule {
    fn new(name: &'static str, read: Read) -> Self {
        Self {
            name,
            selector: Selector::parse(name).unwrap(),
            read,
        }
    }

    /// Text produced by the first element matching this rule, if any.
    pub fn apply(&self, document: &Html) -> Option<String> {
        let element = document.select(&self.selector).next()?;
        match self.read {
            Read::Text => Some(visible_text(element)),
            Read::Attribute(attr) => element.value().attr(attr).map(|v| v.trim().to_string()),
            Read::CleanedText => Some(cleaned_text(element)),
        }
    }
}

pub static TITLE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new("h1", Read::Text),
        Rule::new("h2", Read::Text),
        Rule::new(".article-title", Read::Text),
        Rule::new(".news-title", Read::Text),
        Rule::new(".title", Read::Text),
        Rule::new(r#"meta[property="og:title"]"#, Read::Attribute("content")),
        Rule::new(r#"meta[name="title"]"#, Read::Attribute("content")),
    ]
});

pub static BODY_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new("article", Read::CleanedText),
        Rule::new(".article-body", Read::CleanedText),
        Rule::new(".news-content", Read::CleanedText),
        Rule::new(".article-content", Read::CleanedText),
        Rule::new("#article-view-content-div", Read::CleanedText),
        Rule::new(".view-content", Read::CleanedText),
        Rule::new(".article_view", Read::CleanedText),
    ]
});

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Evaluate `rules` in order and return the first output longer than
/// `min_chars`, together with the name of the rule that produced it.
pub fn first_accepted(
    rules: &[Rule],
    document: &Html,
    min_chars: usize,
) -> Option<(&'static str, String)> {
    rules.iter().find_map(|rule| {
        rule.apply(document)
            .filter(|text| char_len(text) > min_chars)
            .map(|text| (rule.name, text))
    })
}

/// Decode a fetched [`Page`] and extract its [`Article`].
pub fn extract_page(page: &Page) -> Result<Article, PipelineError> {
    let html = decode_html(&page.bytes, page.header_charset.as_deref());
    extract(&html)
}

/// Extract an [`Article`] from raw page HTML.
///
/// # Errors
///
/// - [`PipelineError::MissingTitle`] when no title rule yields more than
///   [`MIN_TITLE_CHARS`] characters
/// - [`PipelineError::BodyTooShort`] when neither the body rules nor the
///   paragraph fallback produce enough text
#[instrument(level = "info", skip_all, fields(html_bytes = html.len()))]
pub fn extract(html: &str) -> Result<Article, PipelineError> {
    let document = Html::parse_document(html);

    let Some((title_rule, title)) = first_accepted(&TITLE_RULES, &document, MIN_TITLE_CHARS)
    else {
        warn!(
            tried = ?TITLE_RULES.iter().map(|r| r.name).collect::<Vec<_>>(),
            "No title found"
        );
        return Err(PipelineError::MissingTitle {
            min_chars: MIN_TITLE_CHARS,
        });
    };
    debug!(rule = title_rule, title = %truncate_for_log(&title, 50), "Title found");

    let content = match first_accepted(&BODY_RULES, &document, MIN_BODY_CHARS) {
        Some((body_rule, content)) => {
            debug!(rule = body_rule, chars = char_len(&content), "Body found");
            content
        }
        None => {
            debug!("No body selector matched; collecting paragraphs");
            let content = paragraph_text(&document);
            let chars = char_len(&content);
            if chars < MIN_FALLBACK_CHARS {
                warn!(chars, "Body missing or too short");
                return Err(PipelineError::BodyTooShort {
                    chars,
                    min_chars: MIN_FALLBACK_CHARS,
                });
            }
            debug!(chars, "Body collected from paragraphs");
            content
        }
    };

    Ok(Article { title, content })
}

/// All text under `element`, concatenated and trimmed.
fn visible_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text nodes under `element`, each trimmed, empty ones dropped, joined with
/// newlines. Nodes inside any [`STRIPPED_TAGS`] descendant are skipped.
fn cleaned_text(element: ElementRef<'_>) -> String {
    let subtree = *element;
    let root = subtree.id();
    subtree
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let stripped = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != root)
                .filter_map(|ancestor| ancestor.value().as_element())
                .any(|el| STRIPPED_TAGS.contains(&el.name()));
            (!stripped).then(|| text.trim())
        })
        .filter(|text| !text.is_empty())
        .join("\n")
}

/// Every non-empty `<p>` in document order, one per line.
fn paragraph_text(document: &Html) -> String {
    document
        .select(&PARAGRAPH)
        .map(visible_text)
        .filter(|text| !text.is_empty())
        .join("\n")
}
