/// Convenience result type used across avatargen.
pub type AvatarResult<T> = Result<T, AvatarError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum AvatarError {
    /// Identifier too short to split into three non-empty parts.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Invalid caller-provided options.
    #[error("validation error: {0}")]
    Validation(String),

    /// A mapped intensity fell outside `[0, 255]` under [`ChannelPolicy::Strict`].
    ///
    /// [`ChannelPolicy::Strict`]: crate::ChannelPolicy::Strict
    #[error("channel overflow: intensity {value} is outside [0, 255]")]
    ChannelOverflow {
        /// Rounded intensity before any narrowing.
        value: f64,
    },

    /// Internal failures while rasterizing or composing.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing options.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AvatarError {
    /// Build an [`AvatarError::InvalidIdentifier`] value.
    pub fn invalid_identifier(msg: impl Into<String>) -> Self {
        Self::InvalidIdentifier(msg.into())
    }

    /// Build an [`AvatarError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AvatarError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build an [`AvatarError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
