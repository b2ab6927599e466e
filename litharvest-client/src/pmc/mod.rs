//! PubMed Central full text via E-utilities

pub mod client;
mod responses;

pub use client::{PmcClient, normalize_pmcid};
