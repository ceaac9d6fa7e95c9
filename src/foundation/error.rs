/// Convenience result type used across Scuderia.
pub type ScuderiaResult<T> = Result<T, ScuderiaError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScuderiaError {
    /// Invalid user-provided or profile data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or sampling interpolators, springs and tweens.
    #[error("animation error: {0}")]
    Animation(String),

    /// An operation was requested in a state that does not allow it.
    #[error("state error: {0}")]
    State(String),

    /// Static asset could not be resolved or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Contact form delivery failed.
    #[error("submission error: {0}")]
    Submission(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScuderiaError {
    /// Build a [`ScuderiaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScuderiaError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ScuderiaError::State`] value.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Build a [`ScuderiaError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ScuderiaError::Submission`] value.
    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    /// Build a [`ScuderiaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
