//! Seams to the GitHub API
//!
//! The pipeline is generic over these traits so it can run against the REST
//! clients in [`crate::http`] or against in-memory fixtures in tests.

use crate::error::Result;
use crate::types::{CommitRange, Comparison, Workflow};
use std::future::Future;

/// Source of commit comparisons
pub trait CommitComparer {
    /// Compare `range.base` to `range.head` in `owner/repo`
    fn compare_commits<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        range: &'a CommitRange,
    ) -> impl Future<Output = Result<Comparison>> + Send + 'a;
}

/// Source of the repository's workflow list
pub trait WorkflowLister {
    /// List workflows defined in `owner/repo`
    fn list_workflows<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
    ) -> impl Future<Output = Result<Vec<Workflow>>> + Send + 'a;
}
