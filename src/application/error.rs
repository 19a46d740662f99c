use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        AppError::InvalidInput(reason.into())
    }

    /// Human-readable reason without the error-kind prefix.
    pub fn reason(&self) -> &str {
        match self {
            AppError::InvalidInput(reason) => reason,
        }
    }
}
