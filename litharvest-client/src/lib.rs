//! # litharvest client
//!
//! Sequential, best-effort fetchers that feed the parsers in
//! `litharvest-parser`:
//!
//! - **PMC**: EFetch full-text XML per PMC ID, one JSON Lines record per article
//! - **UniProt**: a single UniProtKB entry with its comment and feature types
//! - **MDPI**: one AJAX search, then the XML of each kept result
//! - **Rendered MDPI pages**: headless Chromium behind the `browser` feature
//!
//! Every harvest loop waits a fixed delay before each request, logs and skips
//! per-item failures, and appends records to a [`JsonlWriter`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use litharvest_client::{ClientConfig, JsonlWriter, PmcClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PmcClient::with_config(ClientConfig::new())?;
//!     let mut writer = JsonlWriter::open_append("test_1.jsonl").await?;
//!
//!     let report = client.harvest(&["PMC6847991"], &mut writer).await?;
//!     println!("{} written, {} skipped", report.written, report.skipped.len());
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod harvest;
mod http;
pub mod mdpi;
pub mod output;
pub mod pmc;
pub mod uniprot;

// Re-export main types for convenience
pub use browser::{PageRenderer, scrape_rendered};
pub use config::ClientConfig;
pub use error::{HarvestError, Result};
pub use harvest::HarvestReport;
pub use mdpi::{MdpiClient, MdpiSearchParams};
pub use output::JsonlWriter;
pub use pmc::PmcClient;
pub use uniprot::UniProtClient;

pub use litharvest_parser::{
    ArticlePageSummary, MdpiRecord, PmcRecord, RenderedScrape, SearchPageEntry, UniProtSummary,
};
