//! Rendered-page scraping through an in-memory renderer

#[path = "common.rs"]
mod common;

use async_trait::async_trait;
use common::read_fixture;
use litharvest_client::browser::{
    ARTICLE_READY_SELECTOR, SEARCH_READY_SELECTOR, scrape_article_page,
};
use litharvest_client::{HarvestError, PageRenderer, Result, scrape_rendered};
use litharvest_parser::mdpi::NOT_FOUND;
use tracing_test::traced_test;

/// Serves canned HTML per URL and records what it was asked for
#[derive(Default)]
struct FakeRenderer {
    pages: Vec<(String, String)>,
    requests: Vec<(String, String)>,
    closed: usize,
}

impl FakeRenderer {
    fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.push((url.to_string(), html));
        self
    }
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    async fn render(&mut self, url: &str, wait_for: &str) -> Result<String> {
        self.requests.push((url.to_string(), wait_for.to_string()));
        self.pages
            .iter()
            .find(|(page_url, _)| page_url == url)
            .map(|(_, html)| html.clone())
            .ok_or_else(|| HarvestError::SelectorTimeout {
                selector: wait_for.to_string(),
                seconds: 0,
            })
    }

    async fn close(&mut self) -> Result<()> {
        self.closed += 1;
        Ok(())
    }
}

#[tokio::test]
#[traced_test]
async fn test_scrape_rendered_fixture_pages() {
    let mut renderer = FakeRenderer::default()
        .with_page("https://search", read_fixture("html/mdpi_search.html"))
        .with_page("https://article", read_fixture("html/mdpi_article.html"));

    let scrape = scrape_rendered(&mut renderer, "https://search", "https://article")
        .await
        .unwrap();

    let entry = &scrape.search_result_first_article;
    assert_eq!(
        entry.title.as_deref(),
        Some("Formulation ofEmulsifyingExcipients for Oral Delivery")
    );
    assert_eq!(entry.authors.as_deref(), Some(", Anna Nowak, Luis Ortega"));
    assert_eq!(
        entry.pdf_link.as_deref(),
        Some("https://www.mdpi.com/1999-4923/17/9/1166/pdf?version=1757000000")
    );
    assert_eq!(
        scrape.specific_article_content.first_paragraph,
        "Oral delivery of lipophilic drugs remains challenging . Emulsifiers lower interfacial tension ."
    );

    assert_eq!(
        renderer.requests,
        vec![
            ("https://search".to_string(), SEARCH_READY_SELECTOR.to_string()),
            ("https://article".to_string(), ARTICLE_READY_SELECTOR.to_string()),
        ]
    );
    assert_eq!(renderer.closed, 1);
}

#[tokio::test]
async fn test_renderer_closed_after_failure() {
    let mut renderer = FakeRenderer::default()
        .with_page("https://search", read_fixture("html/mdpi_search.html"));

    let err = scrape_rendered(&mut renderer, "https://search", "https://missing")
        .await
        .unwrap_err();

    assert!(matches!(err, HarvestError::SelectorTimeout { .. }));
    assert_eq!(renderer.closed, 1);
}

#[tokio::test]
async fn test_missing_elements_are_not_found() {
    let mut renderer = FakeRenderer::default().with_page(
        "https://article",
        "<html><head></head><body><div class=\"html-p\">x</div></body></html>".to_string(),
    );

    let summary = scrape_article_page(&mut renderer, "https://article")
        .await
        .unwrap();

    assert_eq!(summary.meta_title, NOT_FOUND);
    assert_eq!(summary.meta_abstract, NOT_FOUND);
    assert_eq!(summary.first_paragraph, NOT_FOUND);
    assert_eq!(renderer.closed, 0);
}
