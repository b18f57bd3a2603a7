use thiserror::Error;

/// Errors from transcript retrieval. These are values, not panics: the
/// caller decides how to surface them.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to YouTube failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube returned HTTP {status} for video {video_id}")]
    Status { video_id: String, status: u16 },

    #[error("no caption tracks available for video {0}")]
    NoCaptions(String),

    #[error("unexpected caption payload for video {video_id}: {detail}")]
    Malformed { video_id: String, detail: String },
}

/// Top-level library error.
#[derive(Debug, Error)]
pub enum Error {
    /// The URL holds no recognizable 11-character video identifier.
    #[error("no 11-character video id found in \"{0}\"")]
    InvalidIdentifier(String),

    #[error("failed to fetch transcript: {0}")]
    Fetch(#[from] FetchError),

    /// Sentence or word splitting failed on malformed input. Fatal to the
    /// single summarization call, never retried.
    #[error("could not tokenize input: {0}")]
    Tokenization(String),
}
