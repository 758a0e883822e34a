//! HTTP clients for the GitHub API

pub mod client;
pub mod workflows;

pub use client::GitHubApiClient;
pub use workflows::WorkflowApiClient;

/// Default REST endpoint when `GITHUB_API_URL` is unset
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("diffy/", env!("CARGO_PKG_VERSION"));

/// Shared reqwest client: fixed user agent, 30 second request timeout
pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Attach the GitHub media type, API version and bearer token
pub(crate) fn github_request(
    client: &reqwest::Client,
    url: &str,
    token: Option<&str>,
) -> reqwest::RequestBuilder {
    let request = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .header("X-GitHub-Api-Version", "2022-11-28");

    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Trim a trailing `/` so paths can be appended with `format!`
pub(crate) fn trim_base_url(base_url: String) -> String {
    match base_url.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => base_url,
    }
}
