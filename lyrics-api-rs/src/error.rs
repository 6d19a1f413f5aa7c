use thiserror::Error;

#[derive(Error, Debug)]
pub enum LyricsApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("API error: {0}")]
    Api(String),
}

impl LyricsApiError {
    /// Whether this error is the upstream's ordinary "no such track" answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LyricsApiError::Status { status: 404, .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, LyricsApiError::Network(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, LyricsApiError>;
