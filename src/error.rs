//! Error types for observable-config.

/// Result type alias for observable-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when working with configuration.
///
/// Lookup and removal misses are deliberately not represented here: a `get`
/// on an unset key resolves to `None` and a `remove` of an absent target
/// resolves to `false`, each with a warning log. Only structural failures
/// (a malformed file, a failing filesystem, a malformed key path) surface
/// as errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A line that is not blank, a comment, a section header, or a
    /// `key = value` assignment.
    #[error("Failed to parse configuration at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// What made the line unacceptable.
        message: String,
    },

    /// A key/value assignment appeared before any section header.
    #[error("Key/value line before any section header at line {line}")]
    MissingSectionHeader {
        /// 1-based line number of the offending line.
        line: usize,
    },

    /// IO error occurred while reading or writing the backing file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A combined `section_key` name with no separator was passed to the
    /// path-style accessors.
    #[error("Invalid key path '{0}': expected 'section_key'")]
    InvalidKeyPath(String),
}

impl ConfigError {
    /// Create a parse error for a specific line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
