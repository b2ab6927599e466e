use std::path::Path;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, REFERER};
use tracing::{debug, error, info, instrument, warn};

use litharvest_parser::{
    ArticleText, BodyContainer, MdpiRecord, MdpiSearchHit, MdpiSearchResponse,
};

use crate::config::{BROWSER_USER_AGENT, ClientConfig};
use crate::error::Result;
use crate::harvest::HarvestReport;
use crate::http::{build_client, ensure_success};
use crate::output::JsonlWriter;

/// Results kept from one search page
pub const DEFAULT_MAX_ARTICLES: usize = 5;

/// Query sent to `{base}/search/ajax`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdpiSearchParams {
    pub query: String,
    /// Journal slug, e.g. "pharmaceutics"
    pub journal: String,
    pub page: u32,
}

impl Default for MdpiSearchParams {
    fn default() -> Self {
        Self {
            query: "formulation, excipients, emulsifying".to_string(),
            journal: "pharmaceutics".to_string(),
            page: 1,
        }
    }
}

/// Client that talks to MDPI the way the site's own search page does
#[derive(Clone)]
pub struct MdpiClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl MdpiClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::new())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = config.mdpi_base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        if let Ok(origin) = HeaderValue::from_str(&base_url) {
            headers.insert(ORIGIN, origin);
        }

        let client = build_client(
            &config,
            &config.effective_user_agent(BROWSER_USER_AGENT),
            headers,
        )?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    fn referer(&self, journal: &str) -> String {
        format!("{}/journal/{journal}", self.base_url)
    }

    /// Run one search and return every hit on the requested page.
    ///
    /// A response without `results` yields an empty list.
    #[instrument(skip(self), fields(query = %params.query, journal = %params.journal, page = params.page))]
    pub async fn search(&self, params: &MdpiSearchParams) -> Result<Vec<MdpiSearchHit>> {
        let url = format!("{}/search/ajax", self.base_url);
        let page = params.page.to_string();
        debug!(url = %url, "Making MDPI search request");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("journal", params.journal.as_str()),
                ("q", params.query.as_str()),
                ("page", page.as_str()),
            ])
            .header(REFERER, self.referer(&params.journal))
            .send()
            .await?;
        let body = ensure_success(response)?.text().await?;

        Ok(MdpiSearchResponse::from_json(&body)?.results)
    }

    /// Fetch `{base}{url_path}/xml`.
    pub async fn fetch_article_xml(&self, url_path: &str, journal: &str) -> Result<String> {
        let url = format!("{}{url_path}/xml", self.base_url);
        debug!(url = %url, "Fetching article XML");

        let response = self
            .client
            .get(&url)
            .header(REFERER, self.referer(journal))
            .send()
            .await?;
        Ok(ensure_success(response)?.text().await?)
    }

    /// Fetch the XML behind one search hit and build its record.
    ///
    /// Returns `Ok(None)` when the XML has neither `<body>` nor `<body-text>`.
    pub async fn fetch_record(
        &self,
        hit: &MdpiSearchHit,
        journal: &str,
    ) -> Result<Option<MdpiRecord>> {
        let xml = self.fetch_article_xml(hit.url_path(), journal).await?;
        Ok(record_from_xml(hit, &xml)?)
    }

    /// Search once, keep at most `max_articles` hits and append a record for
    /// each to `writer`.
    ///
    /// A failed search is returned as an error. Per-article failures are
    /// logged and skipped.
    #[instrument(skip(self, params, writer), fields(query = %params.query, max_articles = max_articles))]
    pub async fn harvest(
        &self,
        params: &MdpiSearchParams,
        max_articles: usize,
        writer: &mut JsonlWriter,
    ) -> Result<HarvestReport> {
        let hits = self.search(params).await?;
        if hits.is_empty() {
            info!("No articles found in search results");
            return Ok(HarvestReport::default());
        }
        self.harvest_hits(hits, &params.journal, max_articles, writer)
            .await
    }

    /// Like [`MdpiClient::harvest`], but the output file is only opened
    /// (and created) once the search has returned at least one result.
    #[instrument(skip(self, params, output), fields(query = %params.query, output = %output.display()))]
    pub async fn harvest_to_file(
        &self,
        params: &MdpiSearchParams,
        max_articles: usize,
        output: &Path,
    ) -> Result<HarvestReport> {
        let hits = self.search(params).await?;
        if hits.is_empty() {
            info!("No articles found in search results");
            return Ok(HarvestReport::default());
        }

        let mut writer = JsonlWriter::open_append(output).await?;
        self.harvest_hits(hits, &params.journal, max_articles, &mut writer)
            .await
    }

    async fn harvest_hits(
        &self,
        mut hits: Vec<MdpiSearchHit>,
        journal: &str,
        max_articles: usize,
        writer: &mut JsonlWriter,
    ) -> Result<HarvestReport> {
        let mut report = HarvestReport::default();
        hits.truncate(max_articles);
        info!(count = hits.len(), "Found articles to process");

        for hit in &hits {
            let mdpi_id = hit.article_id().to_string();
            if !self.config.request_delay.is_zero() {
                tokio::time::sleep(self.config.request_delay).await;
            }

            match self.fetch_record(hit, journal).await {
                Ok(Some(record)) => {
                    writer.write_record(&record).await?;
                    report.written += 1;
                    info!(mdpi_id = %mdpi_id, title = %record.title, "Saved article");
                }
                Ok(None) => report.skipped.push(mdpi_id),
                Err(e) => {
                    error!(
                        mdpi_id = %mdpi_id,
                        url = %hit.url_path(),
                        error = %e,
                        "Failed to fetch article XML"
                    );
                    report.failed.push(mdpi_id);
                }
            }
        }

        writer.flush().await?;
        info!(
            written = report.written,
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "MDPI harvest finished"
        );
        Ok(report)
    }
}

fn record_from_xml(
    hit: &MdpiSearchHit,
    xml: &str,
) -> litharvest_parser::Result<Option<MdpiRecord>> {
    let article = ArticleText::parse(xml, BodyContainer::BodyOrBodyText)?;
    let mdpi_id = hit.article_id();

    let Some(text) = article.text() else {
        warn!(mdpi_id = %mdpi_id, "Could not find body");
        return Ok(None);
    };

    Ok(Some(MdpiRecord {
        mdpi_id: mdpi_id.to_string(),
        title: article.title.unwrap_or_else(|| hit.title().to_string()),
        url_path: hit.url_path().to_string(),
        text,
    }))
}
