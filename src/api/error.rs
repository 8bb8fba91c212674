use thiserror::Error;

/// Errors raised by the catalog and ratings clients.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No ratings API key configured")]
    MissingApiKey,
}

impl ApiError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http(e) if e.is_timeout() => "Request timed out".to_string(),
            ApiError::Http(e) if e.is_connect() => "Could not connect to server".to_string(),
            ApiError::Http(e) => format!("Network error: {}", e),
            ApiError::Status { status, .. } => format!("Server error (HTTP {})", status),
            ApiError::NotFound(what) => format!("Not found: {}", what),
            ApiError::Decode(_) => "Unexpected response from server".to_string(),
            ApiError::MissingApiKey => {
                "Ratings disabled: set OMDB_API_KEY or ratings_api_key in config".to_string()
            }
        }
    }

    /// Build a decode error that carries a short prefix of the offending body.
    pub(crate) fn decode(err: serde_json::Error, body: &str) -> Self {
        let snippet: String = body.chars().take(200).collect();
        ApiError::Decode(format!("{err}. Response: {snippet}"))
    }
}
