use wheelhouse_core::error::CoreError;
use wheelhouse_core::validation::ResponseError;

/// Errors from the data-access layer.
///
/// Every variant names the operation that failed (`"Failed to load
/// bikes"`) and keeps the original cause in its message.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("{context}: HTTP request failed: {source}")]
    Request {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// A successful HTTP response whose body was not JSON.
    #[error("{context}: response body is not JSON: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The body was JSON but failed envelope, success or payload checks.
    #[error("{context}: {source}")]
    Response {
        context: &'static str,
        /// HTTP status of the response.
        status: u16,
        #[source]
        source: ResponseError,
    },

    /// A domain rule rejected the operation before or after the request.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClientError {
    /// HTTP status, or the envelope's `statusCode` for failure envelopes.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, source, .. } => source
                .status_code()
                .and_then(|code| u16::try_from(code).ok())
                .or(Some(*status)),
            Self::Request { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error is the server's "no workflow yet" signature.
    pub fn is_missing_workflow(&self) -> bool {
        is_missing_workflow(self)
    }
}

/// Detect a workflow that has not been initialized: a 404 status, or a
/// failure message that mentions "not found".
pub fn is_missing_workflow(err: &ClientError) -> bool {
    match err {
        ClientError::Response { status, source, .. } => {
            if *status == 404 || source.status_code() == Some(404) {
                return true;
            }
            match source {
                // Also covers "Endpoint not found".
                ResponseError::Failure { message, .. } => {
                    message.to_ascii_lowercase().contains("not found")
                }
                _ => false,
            }
        }
        ClientError::Request { source, .. } => {
            source.status().is_some_and(|s| s.as_u16() == 404)
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
