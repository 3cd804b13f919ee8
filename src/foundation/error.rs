/// Crate-wide result alias.
pub type CoverResult<T> = Result<T, CoverError>;

/// Error type for the fallible edges of the crate.
///
/// Layout (tokenize, wrap, paginate) and page rendering never fail; only project validation,
/// asset decoding, font loading and output encoding return this type.
#[derive(thiserror::Error, Debug)]
pub enum CoverError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font discovery or loading failure.
    #[error("font error: {0}")]
    Font(String),

    /// Surface or encoding failure.
    #[error("render error: {0}")]
    Render(String),

    /// Project (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, preserving its source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoverError {
    /// Build a [`CoverError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CoverError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CoverError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CoverError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
