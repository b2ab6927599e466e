//! Records written to JSON Lines output
//!
//! Field order here is serialization order.

use serde::{Deserialize, Serialize};

/// One PMC article as written by the PMC harvest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PmcRecord {
    /// PMC ID normalized to `PMC{digits}` (e.g. "PMC6847991")
    pub pmcid: String,
    /// Article title, empty when the document has none
    pub title: String,
    /// Body paragraphs joined with newlines
    pub text: String,
}

/// One MDPI article as written by the MDPI search harvest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MdpiRecord {
    /// Last segment of the article path (e.g. "1166")
    pub mdpi_id: String,
    pub title: String,
    /// Article path as returned by the search endpoint (e.g. "/1999-4923/17/9/1166")
    pub url_path: String,
    pub text: String,
}
