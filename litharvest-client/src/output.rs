//! JSON Lines output
//!
//! Files are opened in append mode, so repeated runs with the same input
//! accumulate duplicate records.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::Result;

/// Appends one compact JSON object per line to a file
#[derive(Debug)]
pub struct JsonlWriter {
    file: File,
    path: PathBuf,
    written: usize,
}

impl JsonlWriter {
    /// Open `path` for appending, creating it when missing.
    pub async fn open_append<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        debug!(path = %path.display(), "Opened JSONL output");

        Ok(Self {
            file,
            path,
            written: 0,
        })
    }

    /// Serialize `record` and write it followed by a newline.
    pub async fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        self.file.write_all(line.as_bytes()).await?;
        self.written += 1;
        Ok(())
    }

    pub async fn flush(&mut self) -> Result<()> {
        self.file.flush().await?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records written through this writer (not counting earlier file content)
    pub fn written(&self) -> usize {
        self.written
    }
}
