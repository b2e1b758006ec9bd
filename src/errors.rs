use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid loan terms: {message}")]
    InvalidTerms {
        message: String,
    },

    #[error("invalid prepayment policy: {message}")]
    InvalidPolicy {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl EngineError {
    pub(crate) fn terms(message: impl Into<String>) -> Self {
        EngineError::InvalidTerms { message: message.into() }
    }

    pub(crate) fn policy(message: impl Into<String>) -> Self {
        EngineError::InvalidPolicy { message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
