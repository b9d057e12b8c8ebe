use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Channel not found: {0}")]
    NotFound(String),

    #[error("Slack API error: {0}")]
    SlackApi(String),

    #[error("Slack API rate limited (retry after {retry_after:?})")]
    RateLimited { retry_after: Option<Duration> },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ResolverError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Suggested wait before retrying the same request, if the remote sent a usable one.
    ///
    /// A rate limit without a positive `retry_after` is not retryable.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited {
                retry_after: Some(wait),
            } if !wait.is_zero() => Some(*wait),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;
