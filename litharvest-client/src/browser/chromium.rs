//! Headless Chromium over the DevTools protocol

use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::PageRenderer;
use crate::error::{HarvestError, Result};

/// Environment variable checked first when locating Chrome
pub const CHROME_PATH_ENV: &str = "LITHARVEST_CHROME";

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Find a Chrome or Chromium executable.
pub fn find_chromium() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CHROME_PATH_ENV) {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
    ]
    .into_iter()
    .find_map(|name| which::which(name).ok())
}

/// Launch settings for [`ChromiumRenderer`]
#[derive(Debug, Clone)]
pub struct RendererOptions {
    /// Executable to launch; located with [`find_chromium`] when `None`
    pub chrome_executable: Option<PathBuf>,
    /// Upper bound on waiting for the ready selector after each navigation
    pub wait_timeout: Duration,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            chrome_executable: None,
            wait_timeout: Duration::from_secs(30),
        }
    }
}

/// One headless browser process with a single page
pub struct ChromiumRenderer {
    browser: Browser,
    page: Page,
    handler: Option<JoinHandle<()>>,
    wait_timeout: Duration,
}

fn browser_error(context: &str, e: impl std::fmt::Display) -> HarvestError {
    HarvestError::BrowserError(format!("{context}: {e}"))
}

impl ChromiumRenderer {
    /// Launch Chromium and open a blank page.
    pub async fn launch(options: RendererOptions) -> Result<Self> {
        let chrome_path = options
            .chrome_executable
            .or_else(find_chromium)
            .ok_or_else(|| {
                HarvestError::BrowserError(format!(
                    "Chromium not found; install Chrome or set {CHROME_PATH_ENV}"
                ))
            })?;
        debug!(path = %chrome_path.display(), "Launching Chromium");

        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .build()
            .map_err(|e| browser_error("failed to build browser config", e))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| browser_error("failed to launch Chromium", e))?;

        // Drives CDP events until the connection closes
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "CDP handler event error");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    debug!(error = %close_err, "Failed to close browser after page creation failed");
                }
                handler.abort();
                return Err(browser_error("failed to create page", e));
            }
        };

        info!("Chromium launched");
        Ok(Self {
            browser,
            page,
            handler: Some(handler),
            wait_timeout: options.wait_timeout,
        })
    }

    async fn wait_for_selector(&self, selector: &str) -> Result<()> {
        let started = Instant::now();
        loop {
            if self.page.find_element(selector).await.is_ok() {
                debug!(
                    selector = %selector,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Selector ready"
                );
                return Ok(());
            }
            if started.elapsed() >= self.wait_timeout {
                return Err(HarvestError::SelectorTimeout {
                    selector: selector.to_string(),
                    seconds: self.wait_timeout.as_secs(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn render(&mut self, url: &str, wait_for: &str) -> Result<String> {
        debug!(url = %url, "Navigating");
        self.page
            .goto(url)
            .await
            .map_err(|e| browser_error("navigation failed", e))?;

        self.wait_for_selector(wait_for).await?;

        self.page
            .content()
            .await
            .map_err(|e| browser_error("failed to read page content", e))
    }

    async fn close(&mut self) -> Result<()> {
        let Some(handler) = self.handler.take() else {
            return Ok(());
        };

        self.browser
            .close()
            .await
            .map_err(|e| browser_error("failed to close browser", e))?;
        self.browser
            .wait()
            .await
            .map_err(|e| browser_error("failed waiting for browser exit", e))?;
        if let Err(e) = handler.await {
            debug!(error = %e, "CDP handler task did not finish cleanly");
        }

        info!("Chromium closed");
        Ok(())
    }
}
