use std::result;

use thiserror::Error;

/// Error types for fetch and harvest operations
#[derive(Error, Debug)]
pub enum HarvestError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Response body could not be parsed
    #[error(transparent)]
    ParseError(#[from] litharvest_parser::ParseError),

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Invalid PMC ID format
    #[error("Invalid PMC ID format: {pmcid}")]
    InvalidPmcid { pmcid: String },

    /// EFetch answered with an `<ERROR>` document
    #[error("PMC full text not available for PMCID {pmcid}")]
    PmcNotAvailableById { pmcid: String },

    /// E-utilities reported an error in an otherwise successful response
    #[error("E-utilities error: {0}")]
    EutilsError(String),

    /// IO error for output files
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Browser launch, navigation or CDP failure
    #[error("Browser error: {0}")]
    BrowserError(String),

    /// A rendered page never produced the expected element
    #[error("Timed out after {seconds}s waiting for selector {selector}")]
    SelectorTimeout { selector: String, seconds: u64 },
}

pub type Result<T> = result::Result<T, HarvestError>;

impl HarvestError {
    /// HTTP status code, when the failure came with one
    pub fn status(&self) -> Option<u16> {
        match self {
            HarvestError::ApiError { status, .. } => Some(*status),
            HarvestError::RequestError(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
