/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dimension::Dimensions;

#[derive(Serialize, Deserialize, Error, PartialEq, Clone, Debug)]
pub enum UnitError {
    #[error("Unknown unit symbol: {0}")]
    UnknownSymbol(String),
    #[error("Unit parse error at position {position}: {message}")]
    Parse { position: usize, message: String },
    #[error("Incompatible units: {0} <-> {1}")]
    Incompatible(Dimensions, Dimensions),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Invalid conversion factor: {0} (must be finite and positive)")]
    InvalidFactor(f64),
    #[error("Unsupported exponent: {0} (not close to a simple fraction)")]
    Exponent(f64),
    #[error("Exponent overflow (does not fit a 64-bit fraction)")]
    ExponentOverflow,
    #[error("Expected {expected} dimension exponents, got {found}")]
    DimensionCount { expected: usize, found: usize },
    #[error("Payload shape mismatch: {0} <-> {1}")]
    Shape(usize, usize),
    #[error("Symbol table error: {0}")]
    Table(String),
    #[error("JSON error: {0}")]
    Json(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for UnitError {
    fn from(err: serde_json::Error) -> Self {
        UnitError::Json(err.to_string())
    }
}

impl From<std::io::Error> for UnitError {
    fn from(err: std::io::Error) -> Self {
        UnitError::Io(err.to_string())
    }
}
