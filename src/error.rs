use thiserror::Error;

/// Failures of the persistent key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a rejected play request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediaError {
    /// The request was overtaken by a pause or a source change.
    #[error("play request interrupted")]
    Interrupted,

    #[error("media playback failed: {0}")]
    Failed(String),
}

/// Failures of the text-generation collaborator.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("no Gemini API key configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error {status}: {body}")]
    Api { status: u16, body: String },
}
