//! Output formatting and writing

pub mod command;
pub mod json_format;
pub mod writer;

pub use writer::OutputWriter;

use crate::types::Classification;

/// Output names and values in the order they are written
///
/// `previous` is present only when a record matched.
pub fn output_entries(classification: &Classification) -> Vec<(&'static str, String)> {
    let mut entries = vec![
        ("name", classification.name.clone()),
        ("added", classification.added.to_string()),
        ("modified", classification.modified.to_string()),
        ("removed", classification.removed.to_string()),
        ("renamed", classification.renamed.to_string()),
    ];
    if let Some(previous) = &classification.previous {
        entries.push(("previous", previous.clone()));
    }
    entries
}
