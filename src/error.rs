pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by the property API client
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401 or 403 from the backend
    #[error("request rejected with HTTP {status}")]
    Unauthorized { status: u16 },

    #[error("{0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport failed: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("session store failed: {0}")]
    Session(String),
}

impl ApiError {
    /// Whether the property endpoints should fall back to public data
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
