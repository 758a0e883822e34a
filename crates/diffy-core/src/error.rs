//! Error types for diffy-core

use thiserror::Error;

/// Result type alias for diffy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for diffy operations
#[derive(Debug, Error)]
pub enum Error {
    /// Triggering event is neither `push` nor `pull_request`
    #[error("This event ({0}) is unsupported. Diffy only supports PUSH and PR events.")]
    UnsupportedEvent(String),

    /// Event payload is missing fields required for its event kind
    #[error("Event parse error: {0}")]
    EventParse(String),

    /// GitHub API answered with a non-success status
    #[error("The API request for {context} returned {status}, expected 200.")]
    ApiStatus {
        /// What was being requested
        context: String,
        /// HTTP status code
        status: u16,
    },

    /// Head commit is not strictly ahead of the base commit
    #[error("The head commit for this {event} event is not ahead of the base commit (status: {status}).")]
    NotAhead {
        /// Event name that produced the commit pair
        event: String,
        /// Comparison status reported by the API
        status: String,
    },

    /// Strict mode is on and no changed file matched the target
    #[error("None of the files in this commits diff tree match the provided file ({0}).")]
    UnmatchedTarget(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure or undecodable body
    #[error("HTTP error: {0}")]
    Http(String),

    /// Path filter discovery from the workflow file failed
    #[error("Workflow discovery error: {0}")]
    WorkflowDiscovery(String),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the URL, never headers, so the token stays out
        Error::Http(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::EventParse(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err.to_string())
    }
}

/// Fieldless error category for pattern matching without borrowing the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Unsupported event
    UnsupportedEvent,
    /// Malformed event payload
    EventParse,
    /// Non-success API status
    ApiStatus,
    /// Comparison not ahead
    NotAhead,
    /// Strict-mode miss
    UnmatchedTarget,
    /// Configuration error
    Config,
    /// HTTP transport error
    Http,
    /// Workflow discovery error
    WorkflowDiscovery,
    /// YAML parsing error
    Yaml,
    /// I/O operation error
    Io,
}

impl Error {
    /// Get the error kind
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedEvent(_) => ErrorKind::UnsupportedEvent,
            Error::EventParse(_) => ErrorKind::EventParse,
            Error::ApiStatus { .. } => ErrorKind::ApiStatus,
            Error::NotAhead { .. } => ErrorKind::NotAhead,
            Error::UnmatchedTarget(_) => ErrorKind::UnmatchedTarget,
            Error::Config(_) => ErrorKind::Config,
            Error::Http(_) => ErrorKind::Http,
            Error::WorkflowDiscovery(_) => ErrorKind::WorkflowDiscovery,
            Error::Yaml(_) => ErrorKind::Yaml,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Borrow the error's own payload message, without the category prefix.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::UnsupportedEvent(msg)
            | Error::EventParse(msg)
            | Error::UnmatchedTarget(msg)
            | Error::Config(msg)
            | Error::Http(msg)
            | Error::WorkflowDiscovery(msg)
            | Error::Yaml(msg) => msg,
            Error::ApiStatus { context, .. } => context,
            Error::NotAhead { status, .. } => status,
            Error::Io(_) => "I/O error",
        }
    }

    /// Whether this error ends the run. Discovery problems degrade to no-match.
    #[inline]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Error::WorkflowDiscovery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_is_copy() {
        let err = Error::Config("test".to_string());
        let k = err.kind();
        let k2 = k;
        assert_eq!(k, k2);
        assert_eq!(std::mem::size_of::<ErrorKind>(), 1);
    }

    #[test]
    fn test_all_error_variants_have_kind() {
        let cases: Vec<(Error, ErrorKind)> = vec![
            (
                Error::UnsupportedEvent("issue_comment".into()),
                ErrorKind::UnsupportedEvent,
            ),
            (Error::EventParse("ep".into()), ErrorKind::EventParse),
            (
                Error::ApiStatus {
                    context: "compare".into(),
                    status: 404,
                },
                ErrorKind::ApiStatus,
            ),
            (
                Error::NotAhead {
                    event: "push".into(),
                    status: "behind".into(),
                },
                ErrorKind::NotAhead,
            ),
            (
                Error::UnmatchedTarget("src/app.ts".into()),
                ErrorKind::UnmatchedTarget,
            ),
            (Error::Config("c".into()), ErrorKind::Config),
            (Error::Http("h".into()), ErrorKind::Http),
            (
                Error::WorkflowDiscovery("w".into()),
                ErrorKind::WorkflowDiscovery,
            ),
            (Error::Yaml("y".into()), ErrorKind::Yaml),
            (Error::Io(std::io::Error::other("io")), ErrorKind::Io),
        ];

        for (err, expected_kind) in cases {
            assert_eq!(err.kind(), expected_kind, "Mismatch for {:?}", err);
        }
    }

    #[test]
    fn test_display_names_offending_values() {
        let err = Error::UnsupportedEvent("issue_comment".into());
        assert!(err.to_string().contains("issue_comment"));

        let err = Error::ApiStatus {
            context: "this push event".into(),
            status: 502,
        };
        assert!(err.to_string().contains("502"));

        let err = Error::UnmatchedTarget("src/app.ts".into());
        assert!(err.to_string().contains("src/app.ts"));
    }

    #[test]
    fn test_only_discovery_is_non_fatal() {
        assert!(!Error::WorkflowDiscovery("x".into()).is_fatal());
        assert!(Error::UnmatchedTarget("x".into()).is_fatal());
        assert!(Error::Yaml("x".into()).is_fatal());
    }

    #[test]
    fn test_message_borrows_payload() {
        let err = Error::Config("bad config".to_string());
        assert_eq!(err.message(), "bad config");
    }
}
