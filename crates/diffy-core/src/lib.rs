//! # Diffy Core
//!
//! Reports whether one file was added, modified, removed or renamed between
//! the two commits of a GitHub `push` or `pull_request` event.
//!
//! A run is a short pipeline:
//! - classify the event into a base/head commit pair
//! - compare the commits through the GitHub REST API
//! - normalize the requested path (or discover one from the workflow file)
//! - find the first changed file whose contents locator holds the path
//!
//! ## Example
//!
//! ```no_run
//! use diffy_core::{ActionContext, InputConfig, check_file};
//! use std::path::Path;
//!
//! # async fn example() -> diffy_core::Result<()> {
//! let config = InputConfig::new(Some("src/app.ts".into()), "ghs_xxx".into(), true)?;
//! let context = ActionContext::load(
//!     "push",
//!     Path::new("/github/workflow/event.json"),
//!     "octo/demo",
//!     Some("CI"),
//!     None,
//!     None,
//! )?;
//!
//! let result = check_file(&config, &context).await?;
//! println!("{} added: {}", result.classification.name, result.classification.added);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod checker;
pub mod context;
pub mod discovery;
pub mod error;
pub mod event;
pub mod http;
pub mod output;
pub mod platform;
pub mod resolver;
pub mod traits;
pub mod types;

pub use checker::FileChecker;
pub use context::{ActionContext, InputConfig};
pub use error::{Error, ErrorKind, Result};
pub use platform::PathUtil;
pub use types::{
    ChangeKind, ChangedFileRecord, CheckResult, Classification, CommitRange, Comparison,
    ComparisonStatus, Diagnostic, DiagnosticCategory, DiagnosticSeverity, TargetPath, Workflow,
};

/// Run one check against the live GitHub API
///
/// Builds REST clients from `context.api_url` and the configured token, then
/// runs [`FileChecker::check`].
pub async fn check_file(config: &InputConfig, context: &ActionContext) -> Result<CheckResult> {
    let token = Some(config.token.clone());
    let comparer = http::GitHubApiClient::new(context.api_url.clone(), token.clone());
    let lister = http::WorkflowApiClient::new(context.api_url.clone(), token);

    FileChecker::new(&comparer, &lister, config, context)
        .check()
        .await
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_library_version() {
        let _ = env!("CARGO_PKG_VERSION");
    }
}
