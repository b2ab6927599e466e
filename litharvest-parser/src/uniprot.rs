//! Field extraction from UniProtKB entry JSON
//!
//! An entry is a JSON object whose `comments` and `features` keys (both
//! optional) hold lists of objects. Only the `commentType` of each comment and
//! the `type` of each feature are pulled out.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comment and feature types of one UniProtKB entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniProtSummary {
    pub accession: String,
    /// `commentType` values in entry order, duplicates kept
    pub comment_types: Vec<String>,
    /// Lower-cased feature `type` values, first occurrence kept
    pub feature_types: Vec<String>,
}

impl UniProtSummary {
    /// Build a summary from a parsed entry.
    pub fn from_entry(accession: &str, entry: &Value) -> Self {
        Self {
            accession: accession.to_string(),
            comment_types: comment_types(entry),
            feature_types: feature_types(entry),
        }
    }
}

/// Values of `comments[].commentType`, in order.
///
/// Items without the key, non-object items and non-string values are skipped.
/// A missing or non-array `comments` yields an empty list.
pub fn comment_types(entry: &Value) -> Vec<String> {
    string_values(entry, "comments", "commentType").collect()
}

/// Values of `features[].type`, lower-cased and deduplicated keeping the
/// first occurrence.
pub fn feature_types(entry: &Value) -> Vec<String> {
    let mut seen = HashSet::new();
    string_values(entry, "features", "type")
        .map(|value| value.to_lowercase())
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

fn string_values<'a>(
    entry: &'a Value,
    list_key: &str,
    field: &'a str,
) -> impl Iterator<Item = String> + 'a {
    entry
        .get(list_key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(move |item| item.get(field).and_then(Value::as_str))
        .map(str::to_string)
}
