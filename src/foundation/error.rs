/// Convenience result type used across pathchain.
pub type PathchainResult<T> = Result<T, PathchainError>;

/// Top-level error taxonomy.
///
/// Degenerate simulation input (empty chains, non-positive segment durations) is never an
/// error; those cases are absorbed by the follower as "always exhausted".
#[derive(thiserror::Error, Debug)]
pub enum PathchainError {
    /// Invalid user-provided curve, chain or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Surface allocation or rasterization failures. These are fatal for the caller.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing chain documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PathchainError {
    /// Build a [`PathchainError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PathchainError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PathchainError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PathchainError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
