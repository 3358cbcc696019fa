use thiserror::Error;

/// Malformed formula, the offending fragment is the rest of the input
/// starting where parsing stopped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at position {position}: `{fragment}`")]
pub struct ParseError {
    pub message: String,
    pub fragment: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl ToString, fragment: impl ToString, position: usize) -> Self {
        Self {
            message: message.to_string(),
            fragment: fragment.to_string(),
            position,
        }
    }
}

/// Structurally valid but semantically invalid roll
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EvaluationError {
    pub message: String,
}

impl From<&str> for EvaluationError {
    fn from(value: &str) -> Self {
        Self {
            message: value.to_string(),
        }
    }
}

impl From<String> for EvaluationError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

/// Crate Error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Evaluation(#[from] EvaluationError),
}

/// Crate Result type
pub type Result<T> = std::result::Result<T, Error>;
