use anyhow::{Context as _, Result, bail};
use clap::Args;
use std::io::Write;

use litharvest_client::uniprot::DEFAULT_ACCESSION;
use litharvest_client::{ClientConfig, HarvestError, UniProtClient};

#[derive(Args, Debug)]
pub struct Uniprot {
    /// UniProtKB accession
    #[arg(default_value = DEFAULT_ACCESSION)]
    pub accession: String,

    /// UniProt REST base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

impl Uniprot {
    pub async fn execute(&self, mut config: ClientConfig) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            config = config.with_uniprot_base_url(base_url);
        }
        let client =
            UniProtClient::with_config(config).context("Failed to create UniProt client")?;

        let (entry, summary) = match client.fetch_summary(&self.accession).await {
            Ok(fetched) => fetched,
            Err(HarvestError::ApiError { status, message }) => {
                writeln!(std::io::stdout(), "{message}")?;
                bail!("UniProt returned status {status} for {}", self.accession);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to fetch {}", self.accession));
            }
        };

        let mut stdout = std::io::stdout();
        writeln!(stdout, "{}", serde_json::to_string_pretty(&entry)?)?;
        writeln!(stdout, "---")?;
        writeln!(stdout, "Comment types: {:?}", summary.comment_types)?;
        writeln!(stdout, "Feature types: {:?}", summary.feature_types)?;
        Ok(())
    }
}
