//! Error types for the rule engine

use thiserror::Error;

/// Main error type for the rule engine
#[derive(Error, Debug)]
pub enum RuleEngineError {
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { position: usize, character: char },

    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("Parse error at position {position}: {message}")]
    ParseError { position: usize, message: String },

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    #[error("Type mismatch for attribute: {0}")]
    TypeMismatch(String),

    #[error("Combining rules requires at least two operands, got {0}")]
    InsufficientOperands(usize),
}

impl From<serde_json::Error> for RuleEngineError {
    fn from(err: serde_json::Error) -> Self {
        RuleEngineError::DeserializationError(err.to_string())
    }
}

/// Result type alias for the rule engine
pub type Result<T> = std::result::Result<T, RuleEngineError>;
