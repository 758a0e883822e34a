//! GitHub Actions run context and step inputs

use crate::error::{Error, Result};
use crate::http::DEFAULT_API_URL;
use std::path::{Path, PathBuf};

/// Split `owner/repo` as found in `GITHUB_REPOSITORY`
pub fn split_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Config(format!(
            "Invalid GITHUB_REPOSITORY format: {}",
            repository
        ))),
    }
}

/// Parse a boolean input the way the Actions toolkit does
///
/// Accepts `true`, `True`, `TRUE`, `false`, `False`, `FALSE`; empty is `false`.
pub fn parse_bool_input(name: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" | "" => Ok(false),
        other => Err(Error::Config(format!(
            "Input '{}' must be one of true|True|TRUE|false|False|FALSE, got '{}'",
            name, other
        ))),
    }
}

/// Step inputs
#[derive(Clone, Default)]
pub struct InputConfig {
    /// Explicit file path to check, before normalization
    pub path: Option<String>,
    /// API token
    pub token: String,
    /// Fail when nothing matches
    pub strict: bool,
}

impl std::fmt::Debug for InputConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputConfig")
            .field("path", &self.path)
            .field("token", &"<redacted>")
            .field("strict", &self.strict)
            .finish()
    }
}

impl InputConfig {
    /// Validate and build inputs. An empty token is a configuration error.
    pub fn new(path: Option<String>, token: String, strict: bool) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(Error::Config("Input required and not supplied: token".to_string()));
        }
        Ok(Self {
            path: path.filter(|p| !p.is_empty()),
            token,
            strict,
        })
    }
}

/// What the CI host tells the step about the triggering run
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// `GITHUB_EVENT_NAME`
    pub event_name: String,
    /// Decoded `GITHUB_EVENT_PATH` contents
    pub payload: serde_json::Value,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// `GITHUB_WORKFLOW`, the running workflow's declared name
    pub workflow: String,
    /// Checkout root, `GITHUB_WORKSPACE` or the current directory
    pub workspace: PathBuf,
    /// REST API root
    pub api_url: String,
}

impl ActionContext {
    /// Build a context from raw values as the CI host provides them
    ///
    /// `repository` is `owner/repo`; the payload is read from `event_path`.
    /// Empty `workspace` or `api_url` fall back to the current directory and
    /// the public API.
    pub fn load(
        event_name: &str,
        event_path: &Path,
        repository: &str,
        workflow: Option<&str>,
        workspace: Option<&Path>,
        api_url: Option<&str>,
    ) -> Result<Self> {
        if event_name.is_empty() {
            return Err(Error::Config("GITHUB_EVENT_NAME not set".to_string()));
        }
        let payload = read_event_payload(event_path)?;
        let (owner, repo) = split_repository(repository)?;
        let workspace = workspace
            .filter(|w| !w.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let api_url = api_url
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string();

        Ok(Self {
            event_name: event_name.to_string(),
            payload,
            owner,
            repo,
            workflow: workflow.unwrap_or_default().to_string(),
            workspace,
            api_url,
        })
    }
}

/// Read and decode the event payload file
pub fn read_event_payload(path: &Path) -> Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "cannot read event payload '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(serde_json::from_str(&raw)?)
}
