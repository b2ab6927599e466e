//! Rendered MDPI search and article pages

#[path = "../common.rs"]
mod common;

use common::read_fixture;
use litharvest_parser::mdpi::NOT_FOUND;
use litharvest_parser::{ArticlePageSummary, SearchPageEntry};

#[test]
fn test_search_page_first_result() {
    let html = read_fixture("html/mdpi_search.html");
    let entry = SearchPageEntry::parse(&html).unwrap();

    // stripped strings are concatenated without a separator
    assert_eq!(
        entry.title.as_deref(),
        Some("Formulation ofEmulsifyingExcipients for Oral Delivery")
    );
    assert_eq!(entry.authors.as_deref(), Some(", Anna Nowak, Luis Ortega"));
    assert_eq!(
        entry.pdf_link.as_deref(),
        Some("https://www.mdpi.com/1999-4923/17/9/1166/pdf?version=1757000000")
    );
}

#[test]
fn test_article_page_summary() {
    let html = read_fixture("html/mdpi_article.html");
    let summary = ArticlePageSummary::parse(&html).unwrap();

    assert_eq!(
        summary.meta_title,
        "Formulation of Emulsifying Excipients for Oral Delivery"
    );
    assert_eq!(
        summary.meta_abstract,
        "Self-emulsifying systems were prepared and characterised."
    );
    assert_eq!(
        summary.first_paragraph,
        "Oral delivery of lipophilic drugs remains challenging . Emulsifiers lower interfacial tension ."
    );
}

#[test]
fn test_search_fixture_is_not_an_article_page() {
    let html = read_fixture("html/mdpi_search.html");
    let summary = ArticlePageSummary::parse(&html).unwrap();

    assert_eq!(summary.meta_title, NOT_FOUND);
    assert_eq!(summary.meta_abstract, NOT_FOUND);
    assert_eq!(summary.first_paragraph, NOT_FOUND);
}
