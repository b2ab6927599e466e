//! Outcome of a sequential harvest loop

use serde::Serialize;

/// Per-run tally returned by the PMC and MDPI harvest loops.
///
/// `skipped` lists items that were fetched but had nothing to extract;
/// `failed` lists items whose request or parse failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarvestReport {
    pub written: usize,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl HarvestReport {
    /// Items attempted, whatever their outcome
    pub fn attempted(&self) -> usize {
        self.written + self.skipped.len() + self.failed.len()
    }
}
