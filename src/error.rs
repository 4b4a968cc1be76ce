use thiserror::Error;

/// Main error type for vec2graph
#[derive(Error, Debug)]
pub enum Vec2GraphError {
    /// Precondition failures (empty relations, zero top-N, bad threshold)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A relation beyond top-N references a name that never became a node
    #[error("Unknown node '{name}' referenced by relation at rank {rank}")]
    UnknownNode { name: String, rank: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parse errors (embedding files, relation files)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Query word missing from the similarity model
    #[error("Word not in model: {0}")]
    WordNotFound(String),
}

/// Convenient Result type using Vec2GraphError
pub type Result<T> = std::result::Result<T, Vec2GraphError>;
