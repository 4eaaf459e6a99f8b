/// Convenience result type used across the render state core.
pub type RenderResult<T> = Result<T, RenderError>;

/// Error taxonomy for render state and device operations.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// `restore` was called with no matching `save`.
    #[error("stack underflow: restore called on an empty state stack")]
    StackUnderflow,

    /// A component subset named something that is not a state component.
    #[error("invalid component subset: {0}")]
    InvalidComponentSubset(String),

    /// The render device rejected a call.
    #[error("device error: {0}")]
    Device(String),

    /// Options could not be parsed or were out of range.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from a device implementation.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RenderError {
    /// Build a [`RenderError::InvalidComponentSubset`] value.
    pub fn invalid_subset(msg: impl Into<String>) -> Self {
        Self::InvalidComponentSubset(msg.into())
    }

    /// Build a [`RenderError::Device`] value.
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Build a [`RenderError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
