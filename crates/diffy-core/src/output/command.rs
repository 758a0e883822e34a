//! GitHub Actions workflow commands (`::error::`, `::notice::`, ...)

/// Escape for workflow command data (percent-encoding special chars)
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Annotation level of a workflow command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// `::notice::`
    Notice,
    /// `::warning::`
    Warning,
    /// `::error::`
    Error,
}

impl Level {
    /// Command name
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// Render one workflow command line, without the trailing newline
pub fn format_command(level: Level, message: &str) -> String {
    format!("::{}::{}", level.as_str(), escape_data(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("100%\nsure\r"), "100%25%0Asure%0D");
        assert_eq!(escape_data("plain"), "plain");
    }

    #[test]
    fn test_format_command() {
        assert_eq!(
            format_command(Level::Error, "bad\nthing"),
            "::error::bad%0Athing"
        );
        assert_eq!(format_command(Level::Notice, "hi"), "::notice::hi");
    }
}
