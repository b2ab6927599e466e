use reqwest::Client;
use reqwest::header::HeaderMap;
use tracing::{debug, error, info, instrument, warn};

use litharvest_parser::{ArticleText, BodyContainer, PmcRecord};

use crate::config::ClientConfig;
use crate::error::{HarvestError, Result};
use crate::harvest::HarvestReport;
use crate::http::{append_params, build_client, ensure_success};
use crate::output::JsonlWriter;
use crate::pmc::responses::ESearchResult;

/// Normalize a PMC ID to the `PMC{digits}` form.
///
/// The prefix is optional on input. Anything other than digits after it is
/// rejected.
///
/// ```
/// use litharvest_client::pmc::normalize_pmcid;
///
/// assert_eq!(normalize_pmcid("PMC6847991").unwrap(), "PMC6847991");
/// assert_eq!(normalize_pmcid(" 6847991 ").unwrap(), "PMC6847991");
/// assert!(normalize_pmcid("PMC").is_err());
/// ```
pub fn normalize_pmcid(pmcid: &str) -> Result<String> {
    let digits = pmcid.trim().trim_start_matches("PMC");
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(HarvestError::InvalidPmcid {
            pmcid: pmcid.to_string(),
        });
    }
    Ok(format!("PMC{digits}"))
}

/// Client for PMC full-text XML
#[derive(Clone)]
pub struct PmcClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl PmcClient {
    /// Create a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client from `config`.
    ///
    /// # Example
    ///
    /// ```
    /// use litharvest_client::{ClientConfig, PmcClient};
    ///
    /// let config = ClientConfig::new().with_email("curator@example.org");
    /// let client = PmcClient::with_config(config).unwrap();
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = build_client(&config, &config.eutils_user_agent(), HeaderMap::new())?;
        let base_url = config.eutils_base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Fetch the raw EFetch XML for one article.
    ///
    /// # Errors
    ///
    /// * `HarvestError::InvalidPmcid` - the id is not `PMC` followed by digits
    /// * `HarvestError::ApiError` - non-success HTTP status
    /// * `HarvestError::PmcNotAvailableById` - EFetch answered with an error document
    /// * `HarvestError::RequestError` - transport failure or timeout
    pub async fn fetch_xml(&self, pmcid: &str) -> Result<String> {
        let normalized = normalize_pmcid(pmcid)?;

        let mut url = format!(
            "{}/efetch.fcgi?db=pmc&id={normalized}&rettype=full&retmode=xml",
            self.base_url
        );
        append_params(&mut url, &self.config.build_api_params());

        debug!(url = %url, "Making EFetch request");
        let response = ensure_success(self.client.get(&url).send().await?)?;
        let xml = response.text().await?;

        if xml.contains("<ERROR>") {
            return Err(HarvestError::PmcNotAvailableById { pmcid: normalized });
        }

        Ok(xml)
    }

    /// Fetch one article and turn it into a record.
    ///
    /// Returns `Ok(None)` when the document has no `<body>` or the body has no
    /// `<p>` elements.
    pub async fn fetch_record(&self, pmcid: &str) -> Result<Option<PmcRecord>> {
        let xml = self.fetch_xml(pmcid).await?;
        let pmcid = normalize_pmcid(pmcid)?;
        Ok(record_from_xml(&pmcid, &xml)?)
    }

    /// Search PMC and return matching ids in `PMC{digits}` form.
    ///
    /// An empty query returns no ids without a request.
    #[instrument(skip(self), fields(term = %term, retmax = retmax))]
    pub async fn search_pmcids(&self, term: &str, retmax: usize) -> Result<Vec<String>> {
        if term.trim().is_empty() {
            debug!("Empty query provided, returning empty results");
            return Ok(Vec::new());
        }

        let mut url = format!(
            "{}/esearch.fcgi?db=pmc&term={}&retmax={retmax}&retmode=json",
            self.base_url,
            urlencoding::encode(term)
        );
        append_params(&mut url, &self.config.build_api_params());

        debug!("Making ESearch request");
        let response = ensure_success(self.client.get(&url).send().await?)?;
        let search: ESearchResult = serde_json::from_str(&response.text().await?)?;

        // NCBI reports some errors with a 200 status
        if let Some(message) = search.esearchresult.error {
            return Err(HarvestError::EutilsError(message));
        }

        info!(
            total = search.esearchresult.count.as_deref().unwrap_or("0"),
            returned = search.esearchresult.idlist.len(),
            "ESearch completed"
        );

        search
            .esearchresult
            .idlist
            .iter()
            .map(|id| normalize_pmcid(id))
            .collect()
    }

    /// Fetch each id in order and append one record per article to `writer`.
    ///
    /// Waits the configured delay before every request. Request and parse
    /// failures are logged and the loop moves on; only output errors abort.
    #[instrument(skip_all, fields(count = pmcids.len(), output = %writer.path().display()))]
    pub async fn harvest<S: AsRef<str>>(
        &self,
        pmcids: &[S],
        writer: &mut JsonlWriter,
    ) -> Result<HarvestReport> {
        let mut report = HarvestReport::default();

        for pmcid in pmcids {
            let pmcid = pmcid.as_ref();
            if !self.config.request_delay.is_zero() {
                tokio::time::sleep(self.config.request_delay).await;
            }

            match self.fetch_record(pmcid).await {
                Ok(Some(record)) => {
                    writer.write_record(&record).await?;
                    report.written += 1;
                    info!(pmcid = %record.pmcid, "Saved article");
                }
                Ok(None) => report.skipped.push(pmcid.to_string()),
                Err(e) => {
                    error!(pmcid = %pmcid, error = %e, "Failed to fetch article");
                    report.failed.push(pmcid.to_string());
                }
            }
        }

        writer.flush().await?;
        info!(
            written = report.written,
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "PMC harvest finished"
        );
        Ok(report)
    }
}

fn record_from_xml(pmcid: &str, xml: &str) -> litharvest_parser::Result<Option<PmcRecord>> {
    let article = ArticleText::parse(xml, BodyContainer::Body)?;

    let Some(paragraphs) = article.paragraphs else {
        warn!(pmcid = %pmcid, "Could not find body");
        return Ok(None);
    };
    if paragraphs.is_empty() {
        warn!(pmcid = %pmcid, "Body has no paragraphs");
        return Ok(None);
    }

    Ok(Some(PmcRecord {
        pmcid: pmcid.to_string(),
        title: article.title.unwrap_or_default(),
        text: paragraphs.join("\n"),
    }))
}
