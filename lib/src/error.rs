/// Error type for the bookmark editor library
///
/// User cancellation and rejected import content are reported through outcome
/// enums, never through this type. What ends up here is an operation that could
/// not run to completion.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// I/O errors (reading or writing bookmark files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML encoding/decoding errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// A row index that does not exist in the list
    #[error("Row {0} does not exist")]
    RowOutOfRange(usize),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using EditorError
pub type Result<T> = std::result::Result<T, EditorError>;

impl From<serde_yaml::Error> for EditorError {
    fn from(err: serde_yaml::Error) -> Self {
        EditorError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        EditorError::Json(err.to_string())
    }
}
