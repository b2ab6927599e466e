//! Fixture loading shared by the parsing tests

use std::fs;
use std::path::{Path, PathBuf};

fn test_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/test_data")
}

/// Read a fixture or panic with a descriptive message
pub fn read_fixture(relative: &str) -> String {
    let path = test_data_dir().join(relative);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {path:?}"))
}
