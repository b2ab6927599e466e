//! Rendered-page scraping of MDPI search and article pages
//!
//! Rendering sits behind [`PageRenderer`] so that extraction can run on any
//! HTML source. The headless Chromium implementation lives in
//! [`chromium`] behind the `browser` feature.

use async_trait::async_trait;
use tracing::{info, warn};

use litharvest_parser::{ArticlePageSummary, RenderedScrape, SearchPageEntry};

use crate::error::Result;

#[cfg(feature = "browser")]
pub mod chromium;

#[cfg(feature = "browser")]
pub use chromium::{ChromiumRenderer, RendererOptions, find_chromium};

/// Element a rendered search page must contain before it is read
pub const SEARCH_READY_SELECTOR: &str = "div.article-content";

/// Element a rendered article page must contain before it is read
pub const ARTICLE_READY_SELECTOR: &str = "div.html-p";

pub const DEFAULT_SEARCH_URL: &str =
    "https://www.mdpi.com/search?q=formulation+excipients+emulsifying&journal=pharmaceutics";

pub const DEFAULT_ARTICLE_URL: &str = "https://www.mdpi.com/1999-4923/17/9/1166";

/// Something that can load a URL and hand back the HTML after scripts ran
#[async_trait]
pub trait PageRenderer: Send {
    /// Navigate to `url`, wait until `wait_for` matches an element and return
    /// the page HTML.
    async fn render(&mut self, url: &str, wait_for: &str) -> Result<String>;

    /// Release the underlying browser. Called once at the end of a scrape.
    async fn close(&mut self) -> Result<()>;
}

/// Render a search page and extract its first result.
pub async fn scrape_search_page<R>(renderer: &mut R, url: &str) -> Result<SearchPageEntry>
where
    R: PageRenderer + ?Sized,
{
    info!(url = %url, "Scraping search page");
    let html = renderer.render(url, SEARCH_READY_SELECTOR).await?;
    Ok(SearchPageEntry::parse(&html)?)
}

/// Render an article page and extract its metadata and opening paragraph.
pub async fn scrape_article_page<R>(renderer: &mut R, url: &str) -> Result<ArticlePageSummary>
where
    R: PageRenderer + ?Sized,
{
    info!(url = %url, "Scraping article page");
    let html = renderer.render(url, ARTICLE_READY_SELECTOR).await?;
    Ok(ArticlePageSummary::parse(&html)?)
}

/// Scrape the search page, then the article page, then close the renderer.
///
/// The renderer is closed whether or not scraping succeeded. A scrape error
/// takes precedence over a close error.
pub async fn scrape_rendered<R>(
    renderer: &mut R,
    search_url: &str,
    article_url: &str,
) -> Result<RenderedScrape>
where
    R: PageRenderer + ?Sized,
{
    let scraped = scrape_both(renderer, search_url, article_url).await;
    let closed = renderer.close().await;

    match (scraped, closed) {
        (Ok(scrape), Ok(())) => Ok(scrape),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), closed) => {
            if let Err(close_err) = closed {
                warn!(error = %close_err, "Failed to close browser");
            }
            Err(e)
        }
    }
}

async fn scrape_both<R>(
    renderer: &mut R,
    search_url: &str,
    article_url: &str,
) -> Result<RenderedScrape>
where
    R: PageRenderer + ?Sized,
{
    let search_result_first_article = scrape_search_page(renderer, search_url).await?;
    let specific_article_content = scrape_article_page(renderer, article_url).await?;

    Ok(RenderedScrape {
        search_result_first_article,
        specific_article_content,
    })
}
