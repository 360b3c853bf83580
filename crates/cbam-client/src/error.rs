use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("backend rejected {path} (status={status})")]
    Api { status: u16, path: String },

    #[error("invalid base URL: {url}")]
    InvalidBaseUrl { url: String },
}

impl ClientError {
    #[must_use]
    pub fn api(status: u16, path: impl Into<String>) -> Self {
        Self::Api {
            status,
            path: path.into(),
        }
    }

    /// Whether this failure occurred while loading reference data that
    /// the caller may substitute with an empty list.
    #[must_use]
    pub fn is_recoverable_fetch(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Json(_) | Self::Api { .. })
    }
}
