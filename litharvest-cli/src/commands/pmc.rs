use anyhow::{Context as _, Result, bail};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use litharvest_client::{ClientConfig, JsonlWriter, PmcClient};

use super::spinner;

/// Fetched when neither ids nor a query are given
pub const DEFAULT_PMCIDS: &[&str] = &["PMC6847991"];

#[derive(Args, Debug)]
pub struct Pmc {
    /// PMC ID(s) to fetch (e.g., PMC6847991 or 6847991)
    #[arg(conflicts_with = "query")]
    pub pmcids: Vec<String>,

    /// Search PMC and fetch the matching articles instead of listing ids
    #[arg(short, long)]
    pub query: Option<String>,

    /// Maximum number of ids taken from the search
    #[arg(long, default_value_t = 20)]
    pub retmax: usize,

    /// Output JSONL file (appended to)
    #[arg(short, long, default_value = "test_1.jsonl")]
    pub output: PathBuf,

    /// Pause before each request in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,
}

impl Pmc {
    pub async fn execute(&self, config: ClientConfig) -> Result<()> {
        let config = config.with_request_delay(Duration::from_millis(self.delay_ms));
        let client = PmcClient::with_config(config).context("Failed to create PMC client")?;

        let pmcids = self.resolve_pmcids(&client).await?;
        if pmcids.is_empty() {
            bail!("No PMC IDs to fetch");
        }

        let mut writer = JsonlWriter::open_append(&self.output)
            .await
            .with_context(|| format!("Failed to open {}", self.output.display()))?;

        let pb = spinner(format!("Fetching {} PMC articles", pmcids.len()))?;
        let report = client
            .harvest(&pmcids, &mut writer)
            .await
            .context("Failed to write PMC records")?;
        pb.finish_with_message(format!(
            "Processed {} articles ({} saved, {} skipped, {} failed)",
            report.attempted(),
            report.written,
            report.skipped.len(),
            report.failed.len()
        ));

        info!(
            path = %self.output.display(),
            count = report.written,
            "Saved articles to JSONL file"
        );
        Ok(())
    }

    async fn resolve_pmcids(&self, client: &PmcClient) -> Result<Vec<String>> {
        if let Some(query) = &self.query {
            info!(query = %query, "Searching PMC");
            return client
                .search_pmcids(query, self.retmax)
                .await
                .context("PMC search failed");
        }

        if self.pmcids.is_empty() {
            return Ok(DEFAULT_PMCIDS.iter().map(|id| id.to_string()).collect());
        }

        Ok(self.pmcids.clone())
    }
}
