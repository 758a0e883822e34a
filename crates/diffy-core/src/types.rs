//! Core type definitions

use serde::Deserialize;

/// Change status of a file in a commit comparison (GitHub's `files[].status`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Added file
    Added,
    /// Modified file
    Modified,
    /// Removed file
    Removed,
    /// Renamed file
    Renamed,
    /// Copied file
    Copied,
    /// Mode or type change
    Changed,
    /// Listed but not changed
    Unchanged,
    /// Status this crate does not know about
    #[serde(other)]
    Unknown,
}

impl ChangeKind {
    /// Get string representation
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
            Self::Copied => "copied",
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
            Self::Unknown => "unknown",
        }
    }
}

/// Relationship of head to base reported by the compare endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    /// Head contains base plus new commits
    Ahead,
    /// Head is an ancestor of base
    Behind,
    /// Both sides have commits the other lacks
    Diverged,
    /// Same commit
    Identical,
    /// Status this crate does not know about
    #[serde(other)]
    Unknown,
}

impl ComparisonStatus {
    /// Get string representation
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ahead => "ahead",
            Self::Behind => "behind",
            Self::Diverged => "diverged",
            Self::Identical => "identical",
            Self::Unknown => "unknown",
        }
    }
}

/// One file touched by a comparison, as supplied by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangedFileRecord {
    /// URI-like locator that embeds the repository path (may be percent-encoded)
    pub contents_url: String,
    /// Change status
    pub status: ChangeKind,
    /// Current path
    pub filename: String,
    /// Previous path, present for renames
    #[serde(default)]
    pub previous_filename: Option<String>,
}

/// Result of comparing base to head
#[derive(Debug, Clone, Deserialize)]
pub struct Comparison {
    /// Ahead / behind / diverged / identical
    pub status: ComparisonStatus,
    /// Number of commits head is ahead by
    #[serde(default)]
    pub ahead_by: u32,
    /// Number of commits head is behind by
    #[serde(default)]
    pub behind_by: u32,
    /// Commits in the comparison
    #[serde(default)]
    pub total_commits: u32,
    /// Web page for the comparison
    #[serde(default)]
    pub html_url: Option<String>,
    /// Changed files in API order
    #[serde(default)]
    pub files: Vec<ChangedFileRecord>,
}

/// A workflow defined in the repository (`GET /repos/{owner}/{repo}/actions/workflows`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Workflow {
    /// Workflow id
    pub id: u64,
    /// Declared `name:` (falls back to the file path when the file has none)
    pub name: String,
    /// Definition file, relative to the repository root
    pub path: String,
    /// `active`, `disabled_manually`, ...
    #[serde(default)]
    pub state: String,
}

/// The two endpoints of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// Pre-change commit SHA
    pub base: String,
    /// Post-change commit SHA
    pub head: String,
}

/// The normalized path a run is looking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetPath {
    /// Normalized, non-empty path
    Resolved(String),
    /// No explicit path and discovery found nothing. Matches no record.
    Unresolved,
}

impl TargetPath {
    /// Build from an already normalized path; empty becomes `Unresolved`
    pub fn from_normalized(path: String) -> Self {
        if path.is_empty() {
            TargetPath::Unresolved
        } else {
            TargetPath::Resolved(path)
        }
    }

    /// The path, if resolved
    #[inline]
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            TargetPath::Resolved(p) => Some(p),
            TargetPath::Unresolved => None,
        }
    }

    /// Rendering used for outputs and messages; empty when unresolved
    #[inline]
    pub fn display(&self) -> &str {
        self.as_deref().unwrap_or("")
    }

    /// Whether a path is present
    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, TargetPath::Resolved(_))
    }
}

/// Values written back to the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Matched filename, or the target when nothing matched
    pub name: String,
    /// File was added
    pub added: bool,
    /// File was modified
    pub modified: bool,
    /// File was removed
    pub removed: bool,
    /// File was renamed
    pub renamed: bool,
    /// Prior filename; only set when a record matched
    pub previous: Option<String>,
}

impl Classification {
    /// Classify a matched record. Flags follow the record's own status.
    pub fn from_record(record: &ChangedFileRecord, target: &TargetPath) -> Self {
        let previous = record
            .previous_filename
            .clone()
            .or_else(|| Some(record.filename.clone()).filter(|f| !f.is_empty()))
            .unwrap_or_else(|| target.display().to_string());

        Self {
            name: record.filename.clone(),
            added: record.status == ChangeKind::Added,
            modified: record.status == ChangeKind::Modified,
            removed: record.status == ChangeKind::Removed,
            renamed: record.status == ChangeKind::Renamed,
            previous: Some(previous),
        }
    }

    /// All-false result for a target with no matching record
    pub fn unmatched(target: &TargetPath) -> Self {
        Self {
            name: target.display().to_string(),
            ..Default::default()
        }
    }

    /// True when one of the four flags is set
    pub fn any_flag(&self) -> bool {
        self.added || self.modified || self.removed || self.renamed
    }

    /// Number of flags set; never more than one
    pub fn flag_count(&self) -> usize {
        [self.added, self.modified, self.removed, self.renamed]
            .iter()
            .filter(|&&f| f)
            .count()
    }
}

/// Severity of a non-fatal condition reported alongside the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// Informational, shown as a notice
    Notice,
    /// Something went wrong but the run continued
    Warning,
}

/// Where a diagnostic came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    /// Path filter discovery from the workflow file failed
    WorkflowDiscovery,
    /// No changed file matched the target (non-strict)
    UnmatchedTarget,
}

impl DiagnosticCategory {
    /// Get string representation
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WorkflowDiscovery => "workflow_discovery",
            Self::UnmatchedTarget => "unmatched_target",
        }
    }
}

/// A non-fatal condition recorded during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity
    pub severity: DiagnosticSeverity,
    /// Category
    pub category: DiagnosticCategory,
    /// Human-readable message
    pub message: String,
}

/// Everything a successful run produces
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Output values
    pub classification: Classification,
    /// Whether a changed file matched the target
    pub matched: bool,
    /// Target that was searched for
    pub target: TargetPath,
    /// Commits that were compared
    pub range: CommitRange,
    /// Number of changed files in the comparison
    pub files_checked: usize,
    /// Non-fatal conditions, in the order they occurred
    pub diagnostics: Vec<Diagnostic>,
}
