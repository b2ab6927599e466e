pub mod browser;
pub mod mdpi;
pub mod pmc;
pub mod uniprot;

use anyhow::{Context as _, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a sequential run is in progress
pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .context("Failed to set spinner style")?,
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}
