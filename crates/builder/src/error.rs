use thiserror::Error;

/// Errors of the builder crate
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Malformed document `{key}`: {reason}")]
    MalformedDocument { key: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BuilderError {
    pub fn malformed(key: &str, reason: impl std::fmt::Display) -> Self {
        Self::MalformedDocument {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDocument { .. })
    }
}

pub type BuilderResult<T> = Result<T, BuilderError>;
