/// Convenience result type used across the crate.
pub type EditorConfigResult<T> = Result<T, EditorConfigError>;

/// Top-level error taxonomy.
///
/// Missing asset families, missing fields and unresolvable asset names are not errors; they are
/// handled locally by the resolution pass.
#[derive(thiserror::Error, Debug)]
pub enum EditorConfigError {
    /// Wire text is not valid JSON or its top-level value is not an object.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A key path with an empty segment (leading, trailing or doubled dot).
    #[error("invalid key path: {0}")]
    InvalidKeyPath(String),

    /// Invalid resolver configuration or export settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EditorConfigError {
    /// Build a [`EditorConfigError::MalformedDocument`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }

    /// Build a [`EditorConfigError::InvalidKeyPath`] value.
    pub fn invalid_key_path(msg: impl Into<String>) -> Self {
        Self::InvalidKeyPath(msg.into())
    }

    /// Build a [`EditorConfigError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
