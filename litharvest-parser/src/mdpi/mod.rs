//! MDPI search responses and rendered pages

pub mod page;
pub mod search;

pub use page::{ArticlePageSummary, NOT_FOUND, RenderedScrape, SearchPageEntry};
pub use search::{MdpiSearchHit, MdpiSearchResponse, article_id_from_path};
