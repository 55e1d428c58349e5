//! Error types for Tubeseek.

use thiserror::Error;

/// Library-level error type for Tubeseek operations.
#[derive(Error, Debug)]
pub enum TubeseekError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transcript source error: {0}")]
    TranscriptSource(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Corpus shape mismatch: {texts} texts, {timestamps} timestamps, {embeddings} embeddings")]
    ShapeMismatch {
        texts: usize,
        timestamps: usize,
        embeddings: usize,
    },

    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Segment index {index} out of range for corpus of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Zero-magnitude vector has no defined cosine similarity")]
    InvalidVector,

    #[error("Corpus load in progress, querying is disabled until it completes")]
    CorpusLoading,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Tubeseek operations.
pub type Result<T> = std::result::Result<T, TubeseekError>;
