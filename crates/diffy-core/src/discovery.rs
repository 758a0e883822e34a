//! Path filter discovery from the running workflow's definition
//!
//! Used only when no explicit `path` input was given. The running workflow is
//! found by name through the workflows API, its file is read from the
//! workspace, and the first `on.<event>.paths` entry becomes the target.
//! Callers degrade every failure here to [`crate::types::TargetPath::Unresolved`].

use crate::error::{Error, Result};
use crate::http::workflows::find_by_name;
use crate::platform::PathUtil;
use crate::traits::WorkflowLister;
use serde_yaml::Value;
use std::path::Path;

/// Everything discovery needs to know about the run
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryContext<'a> {
    /// Repository owner
    pub owner: &'a str,
    /// Repository name
    pub repo: &'a str,
    /// Declared name of the running workflow
    pub workflow_name: &'a str,
    /// Triggering event name, used as the key under `on:`
    pub event_name: &'a str,
    /// Checkout root the workflow path is relative to
    pub workspace: &'a Path,
}

/// First non-negated `on.<event_name>.paths` entry, normalized
pub fn path_filter_from_yaml(yaml: &str, event_name: &str) -> Result<String> {
    let doc: Value = serde_yaml::from_str(yaml)?;

    let triggers = doc
        .get("on")
        .ok_or_else(|| Error::WorkflowDiscovery("workflow has no 'on' section".to_string()))?;

    let paths = triggers
        .get(event_name)
        .and_then(|event| event.get("paths"))
        .and_then(Value::as_sequence)
        .ok_or_else(|| {
            Error::WorkflowDiscovery(format!("workflow has no 'on.{}.paths' list", event_name))
        })?;

    paths
        .iter()
        .filter_map(Value::as_str)
        .find(|p| !p.starts_with('!'))
        .map(PathUtil::normalize)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            Error::WorkflowDiscovery(format!("'on.{}.paths' has no usable entry", event_name))
        })
}

/// Read a workflow file and extract its path filter
pub async fn read_path_filter(workflow_file: &Path, event_name: &str) -> Result<String> {
    let yaml = tokio::fs::read_to_string(workflow_file).await.map_err(|e| {
        Error::WorkflowDiscovery(format!(
            "cannot read workflow file '{}': {}",
            workflow_file.display(),
            e
        ))
    })?;
    path_filter_from_yaml(&yaml, event_name)
}

/// Locate the running workflow and read its path filter
pub async fn try_discover<L: WorkflowLister>(
    lister: &L,
    ctx: DiscoveryContext<'_>,
) -> Result<String> {
    if ctx.workflow_name.is_empty() {
        return Err(Error::WorkflowDiscovery("workflow name is not set".to_string()));
    }

    let workflows = lister
        .list_workflows(ctx.owner, ctx.repo)
        .await
        .map_err(|e| Error::WorkflowDiscovery(e.to_string()))?;

    let workflow = find_by_name(&workflows, ctx.workflow_name).ok_or_else(|| {
        Error::WorkflowDiscovery(format!("no workflow named '{}'", ctx.workflow_name))
    })?;

    let file = ctx.workspace.join(&workflow.path);
    tracing::debug!(file = %file.display(), "reading workflow definition");
    read_path_filter(&file, ctx.event_name).await
}
