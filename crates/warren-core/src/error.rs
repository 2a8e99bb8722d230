//! Error types for warren-core

use thiserror::Error;

use crate::retry::RetryError;

/// Result type alias using warren-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Warren
#[derive(Error, Debug)]
pub enum Error {
    /// Manifest file not found
    #[error("Manifest file not found: {path}")]
    ManifestNotFound { path: String },

    /// Invalid manifest contents
    #[error("Invalid manifest: {message}")]
    InvalidManifest { message: String },

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A broker CLI exited non-zero or could not be spawned.
    ///
    /// `code` is -1 when no exit code was available (killed by signal, or
    /// the executable could not be spawned at all). Both CLIs are treated
    /// identically; no stderr inspection happens below this boundary.
    #[error("command `{program}` failed (exit code {code}): {stderr}")]
    Process {
        program: String,
        code: i32,
        stderr: String,
    },

    /// A discovery line could not be decoded into an exchange record
    #[error("cannot parse exchange listing for vhost `{vhost}`: {reason} (line: `{line}`)")]
    Parse {
        vhost: String,
        line: String,
        reason: String,
    },

    /// The bounded read-path retry policy was exhausted
    #[error("retry budget exhausted after {attempts} attempts")]
    RetryExhausted {
        attempts: u32,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a manifest not found error
    pub fn manifest_not_found(path: impl Into<String>) -> Self {
        Self::ManifestNotFound { path: path.into() }
    }

    /// Create an invalid manifest error
    pub fn invalid_manifest(message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a process failure error
    pub fn process(program: impl Into<String>, code: i32, stderr: impl Into<String>) -> Self {
        Self::Process {
            program: program.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Create a discovery parse error
    pub fn parse(
        vhost: impl Into<String>,
        line: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Parse {
            vhost: vhost.into(),
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Collapse a retry-engine error back into a core error.
    ///
    /// Exhaustion wraps the final attempt's error without masking it (the
    /// source chain still reaches the original process failure); an error a
    /// predicate refused to retry passes through unchanged.
    pub fn from_retry(err: RetryError<Error>) -> Self {
        match err {
            RetryError::Exhausted {
                attempts, source, ..
            } => Self::RetryExhausted {
                attempts,
                source: Box::new(source),
            },
            RetryError::NonRetryable(source) => source,
        }
    }

    /// Check whether this error is a retry exhaustion
    pub fn is_retry_exhausted(&self) -> bool {
        matches!(self, Self::RetryExhausted { .. })
    }
}
