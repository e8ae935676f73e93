use thiserror::Error;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("insight service returned {status}: {body}")]
    Server { status: u16, body: String },

    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("{0}")]
    Other(String),
}

impl InsightError {
    /// Whether the failure is a quota or rate-limit rejection, which gets a
    /// distinct fallback from other failures.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::Server { status: 429, .. } => true,
            Self::Server { body, .. } => mentions_rate_limit(body),
            #[cfg(feature = "http")]
            Self::Http(e) => e.status().is_some_and(|s| s.as_u16() == 429),
            Self::Other(msg) => mentions_rate_limit(msg),
            Self::Timeout(_) | Self::Malformed(_) => false,
        }
    }
}

fn mentions_rate_limit(msg: &str) -> bool {
    let msg = msg.to_ascii_lowercase();
    ["quota", "rate limit", "rate_limit", "resource_exhausted", "too many requests"]
        .iter()
        .any(|needle| msg.contains(needle))
}
