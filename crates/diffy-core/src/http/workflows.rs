//! GitHub Actions Workflow API client

use crate::error::{Error, Result};
use crate::http::{build_client, github_request, trim_base_url};
use crate::traits::WorkflowLister;
use crate::types::Workflow;
use serde::Deserialize;

/// GitHub API response for the workflows list
#[derive(Debug, Deserialize)]
struct WorkflowsResponse {
    #[allow(dead_code)]
    total_count: u32,
    workflows: Vec<Workflow>,
}

/// GitHub Actions workflow API client
pub struct WorkflowApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for WorkflowApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl WorkflowApiClient {
    /// Create new workflow API client
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            client: build_client(),
            base_url: trim_base_url(base_url),
            token,
        }
    }

    /// List workflows for a repository
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/actions/workflows
    pub async fn fetch_workflows(&self, owner: &str, repo: &str) -> Result<Vec<Workflow>> {
        let url = format!(
            "{}/repos/{}/{}/actions/workflows?per_page=100",
            self.base_url, owner, repo
        );

        let response = github_request(&self.client, &url, self.token.as_deref())
            .send()
            .await
            .map_err(|e| Error::Http(format!("Failed to fetch workflows: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ApiStatus {
                context: format!("listing workflows of {}/{}", owner, repo),
                status: status.as_u16(),
            });
        }

        let body: WorkflowsResponse = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse workflows response: {}", e)))?;

        Ok(body.workflows)
    }
}

impl WorkflowLister for WorkflowApiClient {
    async fn list_workflows<'a>(&'a self, owner: &'a str, repo: &'a str) -> Result<Vec<Workflow>> {
        self.fetch_workflows(owner, repo).await
    }
}

/// Pick the workflow whose declared name is `name`
///
/// GitHub reports the file path as the name for files without `name:`, and
/// `GITHUB_WORKFLOW` carries the same fallback, so the comparison is exact.
pub fn find_by_name<'w>(workflows: &'w [Workflow], name: &str) -> Option<&'w Workflow> {
    workflows.iter().find(|w| w.name == name)
}
