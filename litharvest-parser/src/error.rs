use std::result;

use thiserror::Error;

/// Error types for article, entry and page parsing
#[derive(Error, Debug)]
pub enum ParseError {
    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A CSS selector could not be compiled
    #[error("Invalid CSS selector {selector}: {message}")]
    SelectorError { selector: String, message: String },
}

pub type Result<T> = result::Result<T, ParseError>;
