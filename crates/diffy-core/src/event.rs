//! Triggering event classification
//!
//! Turns the event name and JSON payload GitHub hands the step into the
//! commit pair to compare. Only `push` and `pull_request` are supported.

use crate::error::{Error, Result};
use crate::types::CommitRange;
use serde::Deserialize;

/// Event name for pushes
pub const PUSH: &str = "push";
/// Event name for pull requests
pub const PULL_REQUEST: &str = "pull_request";

/// `push` payload fields we read
#[derive(Debug, Deserialize)]
struct PushPayload {
    before: String,
    after: String,
}

/// `pull_request` payload fields we read
#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    pull_request: PullRequest,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    base: GitRef,
    head: GitRef,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    sha: String,
}

/// A triggering event, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// `push`: compare `before` to `after`
    Push {
        /// Commit before the push
        before: String,
        /// Commit after the push
        after: String,
    },
    /// `pull_request`: compare the PR base to its head
    PullRequest {
        /// Base branch commit
        base: String,
        /// Head branch commit
        head: String,
    },
    /// Anything else
    Unsupported(String),
}

impl TriggerEvent {
    /// Decode the payload for `event_name`
    ///
    /// Unknown event names are not an error here; they produce `Unsupported`.
    /// A known name whose payload lacks the required fields is an `EventParse` error.
    pub fn parse(event_name: &str, payload: &serde_json::Value) -> Result<Self> {
        match event_name {
            PUSH => {
                let p = PushPayload::deserialize(payload).map_err(|e| {
                    Error::EventParse(format!("malformed {} payload: {}", PUSH, e))
                })?;
                Ok(TriggerEvent::Push {
                    before: non_empty_sha(p.before, "before")?,
                    after: non_empty_sha(p.after, "after")?,
                })
            }
            PULL_REQUEST => {
                let p = PullRequestPayload::deserialize(payload).map_err(|e| {
                    Error::EventParse(format!("malformed {} payload: {}", PULL_REQUEST, e))
                })?;
                Ok(TriggerEvent::PullRequest {
                    base: non_empty_sha(p.pull_request.base.sha, "pull_request.base.sha")?,
                    head: non_empty_sha(p.pull_request.head.sha, "pull_request.head.sha")?,
                })
            }
            other => Ok(TriggerEvent::Unsupported(other.to_string())),
        }
    }

    /// Commit pair for supported events
    pub fn commit_range(self) -> Result<CommitRange> {
        match self {
            TriggerEvent::Push { before, after } => Ok(CommitRange {
                base: before,
                head: after,
            }),
            TriggerEvent::PullRequest { base, head } => Ok(CommitRange { base, head }),
            TriggerEvent::Unsupported(name) => Err(Error::UnsupportedEvent(name)),
        }
    }
}

fn non_empty_sha(sha: String, field: &str) -> Result<String> {
    if sha.trim().is_empty() {
        return Err(Error::EventParse(format!("payload field '{}' is empty", field)));
    }
    Ok(sha)
}

/// Whether the event name is one diffy can handle
#[inline]
pub fn is_supported(event_name: &str) -> bool {
    event_name == PUSH || event_name == PULL_REQUEST
}

/// Classify an event into the commit range to compare
///
/// The name is checked before the payload, so an unsupported event fails with
/// `UnsupportedEvent` whatever its payload looks like.
pub fn classify(event_name: &str, payload: &serde_json::Value) -> Result<CommitRange> {
    if !is_supported(event_name) {
        return Err(Error::UnsupportedEvent(event_name.to_string()));
    }
    TriggerEvent::parse(event_name, payload)?.commit_range()
}
