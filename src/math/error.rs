// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid numeric input: {value}")]
    InvalidInput { value: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Vector {index} has length {actual}, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: String },
}

pub type MathResult<T> = Result<T, MathError>;
