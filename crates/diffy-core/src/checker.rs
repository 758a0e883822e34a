//! Run coordinator
//!
//! Sequences one run: classify the event, compare the commits, settle the
//! target path, look it up and decide between success and failure.
//!
//! ```text
//! Start -> EventClassified -> Compared -> TargetResolved -> Matched | Unmatched -> Reported
//! ```
//!
//! Any fatal error short-circuits straight to the caller. On a strict miss
//! nothing is returned but the error, so no outputs get written.

use crate::context::{ActionContext, InputConfig};
use crate::discovery::{self, DiscoveryContext};
use crate::error::{Error, Result};
use crate::event;
use crate::platform::PathUtil;
use crate::resolver::DiffResolver;
use crate::traits::{CommitComparer, WorkflowLister};
use crate::types::{
    CheckResult, Classification, ComparisonStatus, Diagnostic, DiagnosticCategory,
    DiagnosticSeverity, TargetPath,
};

/// Stand-in for the target in messages when no path was given or discovered
pub const UNRESOLVED_LABEL: &str = "<unresolved>";

/// Message for a target that matched nothing
pub fn unmatched_message(path: &str) -> String {
    format!(
        "None of the files in this commits diff tree match the provided file ({}).",
        path
    )
}

/// Coordinates a single run against an API implementation
pub struct FileChecker<'a, C, W> {
    comparer: &'a C,
    lister: &'a W,
    config: &'a InputConfig,
    context: &'a ActionContext,
}

impl<'a, C, W> FileChecker<'a, C, W>
where
    C: CommitComparer,
    W: WorkflowLister,
{
    /// Create a new checker
    pub fn new(
        comparer: &'a C,
        lister: &'a W,
        config: &'a InputConfig,
        context: &'a ActionContext,
    ) -> Self {
        Self {
            comparer,
            lister,
            config,
            context,
        }
    }

    /// Main pipeline
    pub async fn check(&self) -> Result<CheckResult> {
        let ctx = self.context;
        let mut diagnostics = Vec::new();

        // Step 1: event -> commit pair
        let range = event::classify(&ctx.event_name, &ctx.payload)?;
        tracing::info!(
            event = %ctx.event_name,
            base = %range.base,
            head = %range.head,
            "classified event"
        );

        // Step 2: compare
        let comparison = self
            .comparer
            .compare_commits(&ctx.owner, &ctx.repo, &range)
            .await?;

        if comparison.status != ComparisonStatus::Ahead {
            return Err(Error::NotAhead {
                event: ctx.event_name.clone(),
                status: comparison.status.as_str().to_string(),
            });
        }
        tracing::info!(
            files = comparison.files.len(),
            ahead_by = comparison.ahead_by,
            "compared commits"
        );

        // Step 3: settle the target
        let target = self.resolve_target(&mut diagnostics).await;

        // Step 4: look it up
        let resolver = DiffResolver::new(&target);
        let found = resolver.resolve(&comparison.files);

        let (classification, matched) = match found {
            Some(record) => {
                tracing::info!(
                    file = %record.filename,
                    status = record.status.as_str(),
                    "matched changed file"
                );
                (Classification::from_record(record, &target), true)
            }
            None => {
                let requested = self.requested_path(&target);
                if self.config.strict {
                    return Err(Error::UnmatchedTarget(requested.to_string()));
                }
                let message = unmatched_message(requested);
                tracing::info!("{}", message);
                diagnostics.push(Diagnostic {
                    severity: DiagnosticSeverity::Notice,
                    category: DiagnosticCategory::UnmatchedTarget,
                    message,
                });
                (Classification::unmatched(&target), false)
            }
        };

        Ok(CheckResult {
            classification,
            matched,
            target,
            range,
            files_checked: comparison.files.len(),
            diagnostics,
        })
    }

    /// Explicit path when it normalizes to something, else workflow discovery
    async fn resolve_target(&self, diagnostics: &mut Vec<Diagnostic>) -> TargetPath {
        let explicit = self
            .config
            .path
            .as_deref()
            .map(PathUtil::normalize)
            .unwrap_or_default();

        if !explicit.is_empty() {
            return TargetPath::Resolved(explicit);
        }

        let ctx = self.context;
        let discovery_ctx = DiscoveryContext {
            owner: &ctx.owner,
            repo: &ctx.repo,
            workflow_name: &ctx.workflow,
            event_name: &ctx.event_name,
            workspace: &ctx.workspace,
        };

        match discovery::try_discover(self.lister, discovery_ctx).await {
            Ok(path) => {
                tracing::info!(path = %path, "using path filter from workflow");
                TargetPath::from_normalized(path)
            }
            Err(e) => {
                tracing::warn!("path discovery failed, target unresolved: {}", e);
                diagnostics.push(Diagnostic {
                    severity: DiagnosticSeverity::Warning,
                    category: DiagnosticCategory::WorkflowDiscovery,
                    message: e.to_string(),
                });
                TargetPath::Unresolved
            }
        }
    }

    /// Path named in messages: the raw input if given, else the target
    fn requested_path<'t>(&'t self, target: &'t TargetPath) -> &'t str {
        match self.config.path.as_deref() {
            Some(raw) if !raw.is_empty() => raw,
            _ => target.as_deref().unwrap_or(UNRESOLVED_LABEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChangeKind, ChangedFileRecord, CommitRange, Comparison, Workflow};
    use assert_matches::assert_matches;
    use serde_json::json;
    use std::path::PathBuf;

    struct FixedComparer(Comparison);

    impl CommitComparer for FixedComparer {
        async fn compare_commits<'a>(
            &'a self,
            _owner: &'a str,
            _repo: &'a str,
            _range: &'a CommitRange,
        ) -> Result<Comparison> {
            Ok(self.0.clone())
        }
    }

    struct NoWorkflows;

    impl WorkflowLister for NoWorkflows {
        async fn list_workflows<'a>(
            &'a self,
            _owner: &'a str,
            _repo: &'a str,
        ) -> Result<Vec<Workflow>> {
            Ok(Vec::new())
        }
    }

    fn comparison(status: ComparisonStatus, files: Vec<ChangedFileRecord>) -> Comparison {
        Comparison {
            status,
            ahead_by: 1,
            behind_by: 0,
            total_commits: 1,
            html_url: None,
            files,
        }
    }

    fn record(path: &str, status: ChangeKind) -> ChangedFileRecord {
        ChangedFileRecord {
            contents_url: format!("https://api.github.com/repos/o/r/contents/{}?ref=h", path),
            status,
            filename: path.to_string(),
            previous_filename: None,
        }
    }

    fn push_context() -> ActionContext {
        ActionContext {
            event_name: "push".into(),
            payload: json!({"before": "b", "after": "h"}),
            owner: "o".into(),
            repo: "r".into(),
            workflow: "CI".into(),
            workspace: PathBuf::from("."),
            api_url: "https://api.github.com".into(),
        }
    }

    fn config(path: Option<&str>, strict: bool) -> InputConfig {
        InputConfig::new(path.map(str::to_string), "token".into(), strict).unwrap()
    }

    #[tokio::test]
    async fn test_match_modified() {
        let api = FixedComparer(comparison(
            ComparisonStatus::Ahead,
            vec![record("src/lib.rs", ChangeKind::Modified)],
        ));
        let cfg = config(Some("./src//lib.rs"), false);
        let ctx = push_context();
        let result = FileChecker::new(&api, &NoWorkflows, &cfg, &ctx)
            .check()
            .await
            .unwrap();
        assert!(result.matched);
        assert!(result.classification.modified);
        assert_eq!(result.classification.flag_count(), 1);
        assert_eq!(result.target, TargetPath::Resolved("src/lib.rs".into()));
    }

    #[tokio::test]
    async fn test_behind_fails_regardless_of_strict() {
        for strict in [true, false] {
            let api = FixedComparer(comparison(
                ComparisonStatus::Behind,
                vec![record("a.txt", ChangeKind::Added)],
            ));
            let cfg = config(Some("a.txt"), strict);
            let ctx = push_context();
            let err = FileChecker::new(&api, &NoWorkflows, &cfg, &ctx)
                .check()
                .await
                .unwrap_err();
            assert_matches!(err, Error::NotAhead { ref status, .. } if status == "behind");
        }
    }

    #[tokio::test]
    async fn test_unsupported_event_fails_first() {
        let api = FixedComparer(comparison(ComparisonStatus::Ahead, vec![]));
        let cfg = config(Some("a.txt"), false);
        let mut ctx = push_context();
        ctx.event_name = "issue_comment".into();
        let err = FileChecker::new(&api, &NoWorkflows, &cfg, &ctx)
            .check()
            .await
            .unwrap_err();
        assert_matches!(err, Error::UnsupportedEvent(_));
    }

    #[tokio::test]
    async fn test_discovery_failure_degrades_to_unresolved() {
        let api = FixedComparer(comparison(
            ComparisonStatus::Ahead,
            vec![record("a.txt", ChangeKind::Added)],
        ));
        let cfg = config(None, false);
        let ctx = push_context();
        let result = FileChecker::new(&api, &NoWorkflows, &cfg, &ctx)
            .check()
            .await
            .unwrap();
        assert!(!result.matched);
        assert_eq!(result.target, TargetPath::Unresolved);
        assert_eq!(result.classification.name, "");
        assert_eq!(result.diagnostics.len(), 2);
        assert_eq!(
            result.diagnostics[0].category,
            DiagnosticCategory::WorkflowDiscovery
        );
        assert_eq!(result.diagnostics[1].severity, DiagnosticSeverity::Notice);
        assert!(result.diagnostics[1].message.ends_with("(<unresolved>)."));
    }

    #[tokio::test]
    async fn test_unknown_comparison_status_is_not_ahead() {
        let api = FixedComparer(comparison(
            ComparisonStatus::Unknown,
            vec![record("a.txt", ChangeKind::Added)],
        ));
        let cfg = config(Some("a.txt"), false);
        let ctx = push_context();
        let err = FileChecker::new(&api, &NoWorkflows, &cfg, &ctx)
            .check()
            .await
            .unwrap_err();
        assert_matches!(err, Error::NotAhead { ref status, .. } if status == "unknown");
    }

    #[test]
    fn test_unmatched_message_names_path() {
        assert!(unmatched_message("src/app.ts").contains("(src/app.ts)"));
    }
}
