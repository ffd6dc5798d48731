use thiserror::Error;

/// Failure of a single read against the question service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not complete (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("server returned HTTP {status}")]
    Server { status: u16 },

    /// The body did not match the expected schema.
    #[error("malformed response: {0}")]
    Malformed(String),
}

pub type FetchResult<T> = Result<T, FetchError>;
