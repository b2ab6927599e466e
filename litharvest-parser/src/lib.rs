#![deny(
    clippy::panic,
    clippy::absolute_paths,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # litharvest parser
//!
//! Pure, stateless extraction for the documents litharvest collects:
//! JATS-style article XML served by PMC and MDPI, UniProtKB entry JSON,
//! the MDPI search endpoint JSON and rendered MDPI HTML pages.
//!
//! Nothing in this crate touches the network; the HTTP side lives in
//! `litharvest-client`.

pub mod article;
pub mod common;
pub mod error;
pub mod mdpi;
pub mod models;
pub mod uniprot;

// Re-export main types for convenience
pub use article::{ArticleText, BodyContainer};
pub use error::{ParseError, Result};
pub use mdpi::{
    ArticlePageSummary, MdpiSearchHit, MdpiSearchResponse, RenderedScrape, SearchPageEntry,
};
pub use models::{MdpiRecord, PmcRecord};
pub use uniprot::UniProtSummary;
