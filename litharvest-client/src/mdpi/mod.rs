//! MDPI search endpoint and per-article XML

pub mod client;

pub use client::{DEFAULT_MAX_ARTICLES, MdpiClient, MdpiSearchParams};
