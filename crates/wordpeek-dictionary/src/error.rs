#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Invalid dictionary URL: {0}")]
    InvalidUrl(String),

    #[error("\"{0}\" cannot be used as a lookup path")]
    DotSegment(String),

    #[error("Dictionary API timed out")]
    Timeout,

    #[error("Error contacting dictionary API: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedStatus(u16),

    #[error("Error parsing API response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for LookupError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            LookupError::Timeout
        } else {
            // The URL carries the looked-up word
            LookupError::Network(error.without_url())
        }
    }
}
