use thiserror::Error;

/// Request kind, reported alongside HTTP status failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET` of the whole document.
    Fetch,
    /// `PUT` replacing the point list.
    Replace,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch => f.write_str("GET"),
            Self::Replace => f.write_str("PUT"),
        }
    }
}

/// Errors surfaced by [`crate::remote::RemoteStore`] and its transports.
///
/// Nothing is retried; callers decide whether to try again and are expected
/// to show the message as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RemoteStoreError {
    /// Connecting, sending or reading failed, including timeouts.
    #[error("network error talking to {url}: {message}")]
    Network {
        /// Resource URL.
        url: String,
        /// Transport explanation.
        message: String,
    },
    /// The store answered with a non-success status.
    #[error("{operation} {url} failed with status {status}")]
    HttpStatus {
        /// Resource URL.
        url: String,
        /// Request that failed.
        operation: Operation,
        /// Numeric HTTP status code.
        status: u16,
    },
    /// The body was not valid JSON or lacked a required field.
    #[error("failed to parse remote document: {message}")]
    Parse {
        /// Decoder explanation.
        message: String,
    },
}

impl RemoteStoreError {
    /// Status code for [`RemoteStoreError::HttpStatus`] failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Network { .. } | Self::Parse { .. } => None,
        }
    }
}

impl From<serde_json::Error> for RemoteStoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

/// Error type for [`crate::remote::HttpDocumentTransport`] construction.
#[derive(Debug, Error)]
pub enum TransportBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The master key cannot be sent as a header value.
    #[error("master key contains characters not allowed in an HTTP header")]
    InvalidMasterKey,
}
