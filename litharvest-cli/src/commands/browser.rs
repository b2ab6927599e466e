use anyhow::{Context as _, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use litharvest_client::browser::{
    ChromiumRenderer, DEFAULT_ARTICLE_URL, DEFAULT_SEARCH_URL, RendererOptions,
};
use litharvest_client::scrape_rendered;

use super::spinner;

#[derive(Args, Debug)]
pub struct MdpiBrowser {
    /// Search results page to read the first article from
    #[arg(long, default_value = DEFAULT_SEARCH_URL)]
    pub search_url: String,

    /// Article page to read metadata and the introduction from
    #[arg(long, default_value = DEFAULT_ARTICLE_URL)]
    pub article_url: String,

    /// Chrome or Chromium executable (located automatically when omitted)
    #[arg(long, env = "LITHARVEST_CHROME")]
    pub chrome: Option<PathBuf>,

    /// Seconds to wait for each page's content to appear
    #[arg(long, default_value_t = 30)]
    pub wait_timeout_secs: u64,
}

impl MdpiBrowser {
    pub async fn execute(&self) -> Result<()> {
        let options = RendererOptions {
            chrome_executable: self.chrome.clone(),
            wait_timeout: Duration::from_secs(self.wait_timeout_secs),
        };

        let pb = spinner("Launching Chromium")?;
        let mut renderer = ChromiumRenderer::launch(options)
            .await
            .context("Failed to launch browser")?;

        pb.set_message("Scraping rendered pages");
        let scrape = scrape_rendered(&mut renderer, &self.search_url, &self.article_url)
            .await
            .context("Rendered scrape failed")?;
        pb.finish_and_clear();

        let mut stdout = std::io::stdout();
        writeln!(stdout, "\n{}", "=".repeat(50))?;
        writeln!(stdout, "FINAL SCRAPING RESULTS")?;
        writeln!(stdout, "{}", "=".repeat(50))?;
        writeln!(stdout, "{}", scrape.to_json_pretty()?)?;
        Ok(())
    }
}
