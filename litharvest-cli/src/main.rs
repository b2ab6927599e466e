use anyhow::Result;
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use litharvest_client::ClientConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "litharvest",
    about = "Harvest article text and metadata from PMC, UniProt and MDPI",
    long_about = "Sequential fetchers that save PMC and MDPI full text as JSON Lines, \
                  summarise UniProtKB entries and scrape rendered MDPI pages"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// Override the User-Agent sent with every request
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// API key for NCBI E-utilities
    #[arg(long, env = "NCBI_API_KEY", global = true)]
    api_key: Option<String>,

    /// Email for NCBI requests (also added to the default User-Agent)
    #[arg(long, env = "NCBI_EMAIL", global = true)]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", global = true)]
    tool: Option<String>,
}

impl Cli {
    /// Client configuration from the global options
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new().with_timeout(Duration::from_secs(self.timeout_secs));

        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent);
        }
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }
        if let Some(email) = &self.email {
            config = config.with_email(email);
        }
        if let Some(tool) = &self.tool {
            config = config.with_tool(tool);
        }

        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch PMC full text and append one JSON line per article
    Pmc(commands::pmc::Pmc),
    /// Print a UniProtKB entry with its comment and feature types
    Uniprot(commands::uniprot::Uniprot),
    /// Search an MDPI journal and save the XML full text of the first results
    Mdpi(commands::mdpi::Mdpi),
    /// Scrape rendered MDPI search and article pages with headless Chromium
    #[command(name = "mdpi-browser")]
    MdpiBrowser(commands::browser::MdpiBrowser),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with indicatif layer for progress spinners
    let filter = if cli.verbose { "debug" } else { "info" };

    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let config = cli.client_config();

    match &cli.command {
        Commands::Pmc(cmd) => cmd.execute(config).await,
        Commands::Uniprot(cmd) => cmd.execute(config).await,
        Commands::Mdpi(cmd) => cmd.execute(config).await,
        Commands::MdpiBrowser(cmd) => cmd.execute().await,
    }
}
