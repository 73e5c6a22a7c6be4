use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NeoError {
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange { start: String, end: String },

    #[error("date range spans {days} days; at most {max} are allowed")]
    SpanTooLong { days: i64, max: u32 },

    #[error("invalid upstream base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("could not build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl NeoError {
    /// True when the error was caused by the caller's input rather than by
    /// the upstream service or the local machine.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            NeoError::InvalidDate(_)
                | NeoError::InvalidRange { .. }
                | NeoError::SpanTooLong { .. }
        )
    }

    /// True when the upstream service could not be reached or answered with
    /// a body that does not match the endpoint's shape.
    pub fn is_upstream_error(&self) -> bool {
        matches!(self, NeoError::Transport { .. } | NeoError::Decode { .. })
    }
}

pub type Result<T> = std::result::Result<T, NeoError>;
