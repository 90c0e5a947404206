use crate::mcp::errors;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The document could not be turned back into an editable collection.
    #[error("{0}")]
    Format(String),
    /// The underlying input could not be read.
    #[error("{0}")]
    Read(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    #[error("{0}")]
    TooLarge(String),
    #[error("{0}")]
    Internal(String),
}

impl SchemaError {
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn read(message: impl Into<String>) -> Self {
        Self::Read(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SchemaError::Format(_) => errors::FORMAT_ERROR,
            SchemaError::Read(_) => errors::READ_ERROR,
            SchemaError::InvalidInput(_) => errors::INVALID_INPUT,
            SchemaError::IndexOutOfRange { .. } => errors::INDEX_OUT_OF_RANGE,
            SchemaError::TooLarge(_) => errors::TOO_LARGE,
            SchemaError::Internal(_) => errors::INTERNAL_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
