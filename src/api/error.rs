use thiserror::Error;

/// Errors produced by one generation attempt.
///
/// Every failure in the transport or style layer crosses the async boundary
/// as one of these values; nothing panics its way back to the caller. The
/// `Display` messages are user-facing and end up verbatim in the `Failed`
/// notification.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("API key not configured. Set api.key in quill.toml or the COHERE_API_KEY environment variable.")]
    Unconfigured,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("rate limit exceeded. Please wait and try again.")]
    RateLimited,

    #[error("invalid API key. Please check your configuration.")]
    Unauthorized,

    #[error("cannot connect to API: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("unexpected response format: {0}")]
    MalformedResponse(String),

    #[error("API returned status {status}: {body}")]
    Server { status: u16, body: String },
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Connection(e.to_string())
        }
    }
}
