//! UniProtKB REST client

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, info, instrument};

use litharvest_parser::UniProtSummary;

use crate::config::{ClientConfig, DEFAULT_USER_AGENT};
use crate::error::{HarvestError, Result};
use crate::http::build_client;

/// Accession fetched when none is given
pub const DEFAULT_ACCESSION: &str = "P00533";

/// Client for `{base}/uniprotkb/{accession}`
#[derive(Clone)]
pub struct UniProtClient {
    client: Client,
    base_url: String,
}

impl UniProtClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::new())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = build_client(
            &config,
            &config.effective_user_agent(DEFAULT_USER_AGENT),
            headers,
        )?;

        Ok(Self {
            client,
            base_url: config.uniprot_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one entry as untyped JSON.
    ///
    /// # Errors
    ///
    /// A non-success status gives `HarvestError::ApiError` whose `message` is
    /// the response body, so callers can show exactly what the service said.
    #[instrument(skip(self), fields(accession = %accession))]
    pub async fn fetch_entry(&self, accession: &str) -> Result<Value> {
        let url = format!(
            "{}/uniprotkb/{}",
            self.base_url,
            urlencoding::encode(accession.trim())
        );
        debug!(url = %url, "Making UniProt request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(HarvestError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let entry: Value = serde_json::from_str(&body)?;
        info!("Fetched UniProt entry");
        Ok(entry)
    }

    /// Fetch one entry and extract its comment and feature types.
    pub async fn fetch_summary(&self, accession: &str) -> Result<(Value, UniProtSummary)> {
        let entry = self.fetch_entry(accession).await?;
        let summary = UniProtSummary::from_entry(accession.trim(), &entry);
        Ok((entry, summary))
    }
}
