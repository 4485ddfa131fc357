/// Alias for `Result<T, FetchError>`.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors that can occur while retrieving a record from the catalog.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("cannot build HTTP client: {0}")]
    Client(String),

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("request for #{id} failed: {message}")]
    Network {
        /// The requested id.
        id: u32,
        /// Transport error description.
        message: String,
    },

    /// The catalog answered with a non-success status.
    #[error("catalog returned status {status} for #{id}")]
    Status {
        /// The requested id.
        id: u32,
        /// HTTP status code.
        status: u16,
    },

    /// The response body is not a valid record payload.
    #[error("cannot decode catalog response for #{id}: {message}")]
    Decode {
        /// The requested id.
        id: u32,
        /// Parse error description.
        message: String,
    },

    /// Every attempt in the retry budget failed.
    #[error("giving up on #{id} after {attempts} attempt(s)")]
    Exhausted {
        /// The requested id.
        id: u32,
        /// Attempts made.
        attempts: u32,
        /// The error from the final attempt.
        #[source]
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Status { .. })
    }
}
