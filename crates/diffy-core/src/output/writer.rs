//! `$GITHUB_OUTPUT` file writer

use crate::error::Result;
use crate::output::output_entries;
use crate::types::Classification;
use std::io::Write;
use std::path::Path;

const DELIMITER: &str = "DIFFY_EOF";

/// Writes step outputs in the `$GITHUB_OUTPUT` file format
pub struct OutputWriter;

impl OutputWriter {
    /// Render all outputs
    ///
    /// Booleans use `key=value`. Strings use the heredoc form so newlines in
    /// file names cannot inject extra outputs.
    pub fn format(classification: &Classification) -> String {
        let mut buf = String::with_capacity(128);
        for (name, value) in output_entries(classification) {
            if is_flag(name) {
                buf.push_str(name);
                buf.push('=');
                buf.push_str(&value);
                buf.push('\n');
            } else {
                let delim = delimiter_for(&value);
                buf.push_str(name);
                buf.push_str("<<");
                buf.push_str(&delim);
                buf.push('\n');
                buf.push_str(&value);
                buf.push('\n');
                buf.push_str(&delim);
                buf.push('\n');
            }
        }
        buf
    }

    /// Append outputs to the file at `path`, creating it if needed
    pub fn append(path: &Path, classification: &Classification) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)?;
        file.write_all(Self::format(classification).as_bytes())?;
        Ok(())
    }
}

fn is_flag(name: &str) -> bool {
    matches!(name, "added" | "modified" | "removed" | "renamed")
}

/// A delimiter line that does not occur in `value`
fn delimiter_for(value: &str) -> String {
    let mut delim = DELIMITER.to_string();
    let mut n = 0u32;
    while value.lines().any(|line| line == delim) {
        n += 1;
        delim = format!("{}_{}", DELIMITER, n);
    }
    delim
}
