//! GitHub REST API client for commit comparisons

use crate::error::{Error, Result};
use crate::http::{build_client, github_request, trim_base_url};
use crate::traits::CommitComparer;
use crate::types::{CommitRange, Comparison};

/// GitHub API client for `GET /repos/{owner}/{repo}/compare/{base}...{head}`
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            client: build_client(),
            base_url: trim_base_url(base_url),
            token,
        }
    }

    /// Endpoint URL for a comparison
    fn compare_url(&self, owner: &str, repo: &str, range: &CommitRange) -> String {
        format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.base_url, owner, repo, range.base, range.head
        )
    }

    /// Compare two commits
    ///
    /// Only the first page of files is read; GitHub caps it at 300 entries.
    pub async fn fetch_comparison(
        &self,
        owner: &str,
        repo: &str,
        range: &CommitRange,
    ) -> Result<Comparison> {
        let url = self.compare_url(owner, repo, range);
        tracing::debug!(%url, "comparing commits");

        let response = github_request(&self.client, &url, self.token.as_deref())
            .send()
            .await
            .map_err(|e| Error::Http(format!("GitHub compare request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ApiStatus {
                context: format!("comparing {}...{}", range.base, range.head),
                status: status.as_u16(),
            });
        }

        response
            .json::<Comparison>()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse compare response: {}", e)))
    }
}

impl CommitComparer for GitHubApiClient {
    async fn compare_commits<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        range: &'a CommitRange,
    ) -> Result<Comparison> {
        self.fetch_comparison(owner, repo, range).await
    }
}
