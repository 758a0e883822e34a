//! Locate the target among a comparison's changed files

use crate::types::{ChangedFileRecord, Classification, TargetPath};
use memchr::memmem;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Prefix every contents locator puts in front of the repository path
const CONTENTS_PREFIX: &str = "contents/";

/// Matches a normalized target against contents locators
///
/// The needle `contents/<target>` is built once; each locator is percent-decoded
/// before the substring search so paths with spaces or non-ASCII characters match.
pub struct DiffResolver {
    needle: Option<String>,
}

impl DiffResolver {
    /// Create a resolver for `target`. An unresolved target matches nothing.
    pub fn new(target: &TargetPath) -> Self {
        let needle = target
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("{}{}", CONTENTS_PREFIX, t));
        Self { needle }
    }

    /// Whether a single locator contains the needle after decoding
    pub fn matches(&self, contents_url: &str) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return false;
        };
        let decoded = decode_locator(contents_url);
        memmem::find(decoded.as_bytes(), needle.as_bytes()).is_some()
    }

    /// First record in API order whose locator matches; later matches are ignored
    pub fn resolve<'f>(&self, files: &'f [ChangedFileRecord]) -> Option<&'f ChangedFileRecord> {
        self.needle.as_ref()?;
        files.iter().find(|f| self.matches(&f.contents_url))
    }
}

/// Percent-decode a contents locator. Invalid UTF-8 is replaced, not rejected.
#[inline]
pub fn decode_locator(contents_url: &str) -> Cow<'_, str> {
    percent_decode_str(contents_url).decode_utf8_lossy()
}

/// Find the first record matching `target`
pub fn resolve<'f>(
    files: &'f [ChangedFileRecord],
    target: &TargetPath,
) -> Option<&'f ChangedFileRecord> {
    DiffResolver::new(target).resolve(files)
}

/// Resolve and classify in one step; `None` when nothing matched
pub fn classify_target(files: &[ChangedFileRecord], target: &TargetPath) -> Option<Classification> {
    resolve(files, target).map(|record| Classification::from_record(record, target))
}
