//! Field extraction from rendered MDPI HTML
//!
//! Works on the HTML a browser produced after the page's scripts ran. The
//! selectors are MDPI's own class names and break silently if the site
//! changes its markup; every missing element turns into [`NOT_FOUND`].

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use serde::{Deserialize, Serialize};
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;

use crate::error::{ParseError, Result};

/// Placeholder for any field whose element is missing
pub const NOT_FOUND: &str = "Not Found";

/// Prefix for relative links found on MDPI pages
pub const MDPI_ORIGIN: &str = "https://www.mdpi.com";

/// First result on an MDPI search page.
///
/// All fields are `None` when the page has no `div.article-content`, which
/// serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPageEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_link: Option<String>,
}

/// Metadata and opening paragraph of an MDPI article page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePageSummary {
    pub meta_title: String,
    pub meta_abstract: String,
    pub first_paragraph: String,
}

/// Combined console output of a rendered scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedScrape {
    #[serde(rename = "Search_Result_First_Article")]
    pub search_result_first_article: SearchPageEntry,
    #[serde(rename = "Specific_Article_Content")]
    pub specific_article_content: ArticlePageSummary,
}

impl RenderedScrape {
    /// Pretty JSON with four-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ParseError::SelectorError {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn authors_prefix_regex() -> &'static Regex {
    static BY_PREFIX: OnceLock<Regex> = OnceLock::new();
    BY_PREFIX.get_or_init(|| Regex::new(r"by\s*").expect("Failed to compile authors regex"))
}

fn citation_regex() -> &'static Regex {
    static CITATION: OnceLock<Regex> = OnceLock::new();
    CITATION.get_or_init(|| Regex::new(r"\[\d+.*?\]").expect("Failed to compile citation regex"))
}

fn introduction_regex() -> &'static Regex {
    static INTRODUCTION: OnceLock<Regex> = OnceLock::new();
    INTRODUCTION
        .get_or_init(|| Regex::new(r"\s*1\. Introduction").expect("Failed to compile heading regex"))
}

/// Text nodes below `element`, each trimmed, empty ones dropped.
fn stripped_strings<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element.text().map(str::trim).filter(|s| !s.is_empty())
}

fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    stripped_strings(element).collect::<Vec<_>>().join(separator)
}

/// The element's only string: defined when it has exactly one child and that
/// child is a text node or itself has an only string.
fn sole_string(element: ElementRef<'_>) -> Option<String> {
    let mut children = element.children();
    let child = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match child.value() {
        Node::Text(text) => {
            let text: &str = text;
            Some(text.to_string())
        }
        Node::Element(_) => ElementRef::wrap(child).and_then(sole_string),
        _ => None,
    }
}

impl SearchPageEntry {
    /// Extract the first search result from a rendered search page.
    ///
    /// # Example
    ///
    /// ```
    /// use litharvest_parser::SearchPageEntry;
    ///
    /// let html = r#"<div class="article-content">
    ///     <a class="title-link" href="/x">A title</a>
    ///     <div class="authors"><span>by Ann</span> <span>Bob</span></div>
    /// </div>"#;
    /// let entry = SearchPageEntry::parse(html).unwrap();
    /// assert_eq!(entry.title.as_deref(), Some("A title"));
    /// assert_eq!(entry.authors.as_deref(), Some("Ann, Bob"));
    /// assert_eq!(entry.pdf_link.as_deref(), Some("Not Found"));
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let article_selector = selector("div.article-content")?;

        let Some(article) = document.select(&article_selector).next() else {
            return Ok(Self::default());
        };

        let title = article
            .select(&selector("a.title-link")?)
            .next()
            .map(|link| joined_text(link, ""))
            .unwrap_or_else(|| NOT_FOUND.to_string());

        let authors = article
            .select(&selector("div.authors")?)
            .next()
            .map(|div| {
                let joined = joined_text(div, ", ");
                authors_prefix_regex()
                    .replace_all(&joined, "")
                    .trim()
                    .to_string()
            })
            .unwrap_or_else(|| NOT_FOUND.to_string());

        let pdf_link = article
            .select(&selector("a.UD_Listings_ArticlePDF")?)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(|href| format!("{MDPI_ORIGIN}{href}"))
            .unwrap_or_else(|| NOT_FOUND.to_string());

        Ok(Self {
            title: Some(title),
            authors: Some(authors),
            pdf_link: Some(pdf_link),
        })
    }
}

impl ArticlePageSummary {
    /// Extract meta tags and the first Introduction paragraph from a rendered
    /// article page.
    pub fn parse(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);

        let meta_content = |name: &str| -> Result<String> {
            let css = format!(r#"meta[name="{name}"]"#);
            Ok(document
                .select(&selector(&css)?)
                .next()
                .and_then(|meta| meta.value().attr("content"))
                .map(str::to_string)
                .unwrap_or_else(|| NOT_FOUND.to_string()))
        };

        let meta_title = meta_content("title")?;
        let meta_abstract = meta_content("dc.description")?;

        let heading = document.select(&selector("h2")?).find(|h2| {
            sole_string(*h2).is_some_and(|text| introduction_regex().is_match(&text))
        });

        let first_paragraph = heading
            .and_then(|h2| {
                h2.next_siblings()
                    .filter_map(ElementRef::wrap)
                    .find(|sibling| {
                        sibling.value().name() == "div"
                            && sibling.value().classes().any(|class| class == "html-p")
                    })
            })
            .map(|div| {
                let text = joined_text(div, " ");
                citation_regex().replace_all(&text, "").trim().to_string()
            })
            .unwrap_or_else(|| NOT_FOUND.to_string());

        Ok(Self {
            meta_title,
            meta_abstract,
            first_paragraph,
        })
    }
}
