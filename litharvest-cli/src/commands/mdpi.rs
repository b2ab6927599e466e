use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use litharvest_client::mdpi::DEFAULT_MAX_ARTICLES;
use litharvest_client::{ClientConfig, MdpiClient, MdpiSearchParams};

use super::spinner;

#[derive(Args, Debug)]
pub struct Mdpi {
    /// Search query
    #[arg(short, long, default_value = "formulation, excipients, emulsifying")]
    pub query: String,

    /// Journal slug
    #[arg(short, long, default_value = "pharmaceutics")]
    pub journal: String,

    /// Result page to request
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Maximum number of results to fetch
    #[arg(long, default_value_t = DEFAULT_MAX_ARTICLES)]
    pub max_articles: usize,

    /// Output JSONL file (appended to)
    #[arg(short, long, default_value = "mdpi_pharmaceutics.jsonl")]
    pub output: PathBuf,

    /// Pause before each article request in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,
}

impl Mdpi {
    pub async fn execute(&self, config: ClientConfig) -> Result<()> {
        let config = config.with_request_delay(Duration::from_millis(self.delay_ms));
        let client = MdpiClient::with_config(config).context("Failed to create MDPI client")?;

        let params = MdpiSearchParams {
            query: self.query.clone(),
            journal: self.journal.clone(),
            page: self.page,
        };
        info!(query = %params.query, journal = %params.journal, "Fetching search results");

        let pb = spinner(format!("Searching {}", params.journal))?;
        let report = client
            .harvest_to_file(&params, self.max_articles, &self.output)
            .await
            .context("MDPI harvest failed")?;
        pb.finish_with_message(format!(
            "Processed {} articles ({} saved, {} skipped, {} failed)",
            report.attempted(),
            report.written,
            report.skipped.len(),
            report.failed.len()
        ));

        info!(path = %self.output.display(), count = report.written, "Scraping complete");
        Ok(())
    }
}
