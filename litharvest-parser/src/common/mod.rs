//! Helpers shared by the XML and HTML extractors

pub mod reader_utils;

pub use reader_utils::{make_reader, read_text_content};
